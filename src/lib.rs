//! # lzwrs
//!
//! Lossless file compression on classic variable-width LZW — the
//! `compress`(1)/`.Z` family member with no GIF-style clear code and no
//! mid-stream dictionary reset.
//!
//! * `bitio` packs/unpacks variable-width codes into a byte stream.
//! * `width` tracks the shared code-width growth rule.
//! * `encoder` / `decoder` hold the dictionary logic for each direction.
//!
//! ## File Example
//!
//! ```rs
//! use lzwrs::*;
//! let ok = compress_file(std::path::Path::new("some_input_path"),
//!                         std::path::Path::new("some_input_path.Z"))
//!     .expect("compression failed");
//! ```
//!
//! ## Buffer Example
//!
//! ```rs
//! use lzwrs::encoder::compress_slice;
//! let test_data = b"This is the chaunt of the priests.  The chaunt of the priests of Mung.";
//! let compressed = compress_slice(test_data).expect("compression failed");
//! ```

pub mod bitio;
pub mod decoder;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod width;

use std::fs::File;
use std::path::Path;

pub use error::{LzwError, LzwResult};

/// Size of the single-byte alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Reserved code that terminates every stream; never a real byte value.
pub const STREAM_END: u32 = ALPHABET_SIZE as u32;

/// Code width at the start of every stream, before any growth.
pub const INITIAL_CODE_WIDTH: u32 = 9;

/// Practical ceiling on code width; exceeding it is a hard error rather
/// than silent wraparound.
pub const MAX_CODE_WIDTH: u32 = 24;

/// Canonical extension used to mark a compressed file, matching the
/// original `lzw3` tool this crate supersedes.
pub const COMPRESSED_EXTENSION: &str = "Z";

/// Compresses the file at `in_path` into `out_path`.
///
/// Returns `Ok(false)` if `in_path` does not exist; `Ok(true)` on success.
pub fn compress_file(in_path: &Path, out_path: &Path) -> LzwResult<bool> {
    if !in_path.exists() {
        return Ok(false);
    }
    log::debug!("compressing {}", in_path.display());
    let input = File::open(in_path)?;
    let output = File::create(out_path)?;
    let (in_count, out_count) = encoder::compress(input, output)?;
    log::debug!("compressed {in_count} bytes into {out_count} bytes");
    Ok(true)
}

/// Decompresses the file at `in_path` into `out_path`.
///
/// Returns `Ok(false)` if `in_path` does not exist; `Ok(true)` on success.
pub fn decompress_file(in_path: &Path, out_path: &Path) -> LzwResult<bool> {
    if !in_path.exists() {
        return Ok(false);
    }
    log::debug!("decompressing {}", in_path.display());
    let input = File::open(in_path)?;
    let output = File::create(out_path)?;
    let (in_count, out_count) = decoder::decompress(input, output)?;
    log::debug!("decompressed {in_count} bytes into {out_count} bytes");
    Ok(true)
}
