//! Filesystem plumbing for the CLI: directory recursion, `.Z`-extension
//! bookkeeping, and permission copying. None of this is part of the
//! stream format itself (it lives above `compress_file`/`decompress_file`),
//! following the control flow of `LZWHelper`/`*CompressorHelper._handle_file`
//! from the original `lzw3` tool this crate supersedes.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::{compress_file, decompress_file, COMPRESSED_EXTENSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

pub struct Options {
    pub recursive: bool,
    pub keep: bool,
    pub force: bool,
    pub time: bool,
    pub verbose: bool,
}

/// Walks `inputs`, expanding directories into their contained files when
/// `recursive` is set (mirrors `LZWHelper._handle_directory`'s `os.walk`).
pub fn collect_files(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            if !recursive {
                log::warn!(
                    "'{}' is a directory, skipping it (pass -r to recurse)",
                    input.display()
                );
                continue;
            }
            for entry in walkdir::WalkDir::new(input) {
                let entry = entry.with_context(|| format!("walking {}", input.display()))?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn compressed_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

fn has_compressed_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(COMPRESSED_EXTENSION))
        .unwrap_or(false)
}

fn strip_compressed_extension(path: &Path) -> PathBuf {
    path.with_extension("")
}

/// Copies `src`'s Unix permission bits onto `dst`. Read before any
/// deletion of the source, applied after the destination exists, so a
/// source removed mid-operation can never leave permissions unread.
fn copy_permissions(src: &Path, dst: &Path) -> Result<()> {
    let mode = fs::metadata(src)
        .with_context(|| format!("reading permissions of {}", src.display()))?
        .permissions()
        .mode()
        & 0o7777;
    fs::set_permissions(dst, fs::Permissions::from_mode(mode))
        .with_context(|| format!("setting permissions on {}", dst.display()))?;
    Ok(())
}

fn humanify_bytesize(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes}{}", UNITS[0])
    } else {
        format!("{size:.1}{}", UNITS[unit])
    }
}

/// Processes one file according to `mode` and `opts`, matching
/// `_handle_file`'s branching in the original `compressor.py`/
/// `decompressor.py`.
pub fn handle_file(mode: Mode, path: &Path, opts: &Options) -> Result<()> {
    match mode {
        Mode::Compress => handle_compress(path, opts),
        Mode::Decompress => handle_decompress(path, opts),
    }
}

fn handle_compress(path: &Path, opts: &Options) -> Result<()> {
    let uncompressed_size = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    let out_path = compressed_path_for(path);

    log::debug!("compressing '{}' ({uncompressed_size} bytes)", path.display());
    let start = Instant::now();
    compress_file(path, &out_path)?;
    let elapsed = start.elapsed();

    let compressed_size = fs::metadata(&out_path)?.len();

    if opts.force || compressed_size < uncompressed_size {
        let saved = (1.0 - (compressed_size as f64 / uncompressed_size.max(1) as f64)) * 100.0;
        if opts.verbose {
            println!(
                "'{}' compressed from {} to {} - space saved = {saved:.1}%{}",
                path.display(),
                humanify_bytesize(uncompressed_size),
                humanify_bytesize(compressed_size),
                time_suffix(opts, elapsed),
            );
        }
        copy_permissions(path, &out_path)?;
        if !opts.keep {
            fs::remove_file(path)?;
        }
    } else {
        log::debug!("'{}' would not shrink, leaving uncompressed", path.display());
        if opts.verbose {
            println!("'{}' left uncompressed{}", path.display(), time_suffix(opts, elapsed));
        }
        fs::remove_file(&out_path)?;
    }
    Ok(())
}

fn handle_decompress(path: &Path, opts: &Options) -> Result<()> {
    let (out_path, in_place) = if has_compressed_extension(path) {
        (strip_compressed_extension(path), false)
    } else if opts.force {
        log::debug!(
            "'{}' lacks the .{COMPRESSED_EXTENSION} extension; handling anyway due to -f",
            path.display()
        );
        (path.to_path_buf(), true)
    } else {
        log::debug!("'{}' lacks the .{COMPRESSED_EXTENSION} extension; skipping", path.display());
        if opts.verbose {
            println!("'{}' skipped", path.display());
        }
        return Ok(());
    };

    // Read before any write/rename happens, in_place included, so the
    // source's mode is always captured even though in that case `out_path`
    // and `path` name the same file.
    let mode = fs::metadata(path)
        .with_context(|| format!("reading permissions of {}", path.display()))?
        .permissions()
        .mode()
        & 0o7777;

    log::debug!("decompressing '{}'", path.display());
    let start = Instant::now();
    if in_place {
        let tmp = out_path.with_extension("lzwrs-tmp");
        decompress_file(path, &tmp)?;
        fs::rename(&tmp, &out_path)?;
    } else {
        decompress_file(path, &out_path)?;
    }
    let elapsed = start.elapsed();

    if opts.verbose {
        println!("'{}' decompressed{}", path.display(), time_suffix(opts, elapsed));
    }

    fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("setting permissions on {}", out_path.display()))?;

    if !in_place && !opts.keep {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn time_suffix(opts: &Options, elapsed: std::time::Duration) -> String {
    if opts.time {
        format!(" ({}ms)", elapsed.as_millis())
    } else {
        String::new()
    }
}
