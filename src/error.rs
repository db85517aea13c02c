//! Error types for binary stream access

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Integer {value} does not fit in {size} signed bytes")]
    IntegerOverflow { value: i64, size: usize },

    #[error("Integer width must be at least 1 byte")]
    InvalidWidth,

    #[error("Integer cell of {size} bytes exceeds the i64 range")]
    IntegerTooWide { size: usize },

    #[error("String of {length} bytes exceeds the 2-byte length prefix")]
    StringTooLong { length: usize },

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Short read: fewer than {wanted} bytes available")]
    ShortRead { wanted: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failure: either the value itself was malformed
/// or the underlying stream misbehaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Encoding,
    Stream,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IntegerOverflow { .. }
            | Error::InvalidWidth
            | Error::IntegerTooWide { .. }
            | Error::StringTooLong { .. }
            | Error::InvalidUtf8(_) => ErrorKind::Encoding,
            Error::ShortRead { .. } | Error::Io(_) => ErrorKind::Stream,
        }
    }
}
