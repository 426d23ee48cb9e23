//! Error taxonomy for the LZW core.
//!
//! A small `thiserror` enum rather than a single catch-all variant,
//! because the decoder's malformed-input cases need to be distinct so
//! callers and tests can tell a truncated stream apart from a bad code.

#[derive(thiserror::Error, Debug)]
pub enum LzwError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed compressed stream: code {code} exceeds next code {next_code}")]
    InvalidCode { code: u32, next_code: u32 },
    #[error("truncated compressed stream: end-of-stream marker never seen")]
    TruncatedStream,
    #[error("code width exceeded maximum of {0} bits")]
    CodeWidthExceeded(u32),
}

pub type LzwResult<T> = Result<T, LzwError>;
