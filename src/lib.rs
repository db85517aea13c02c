//! Binfile: typed access to seekable binary streams
//!
//! This library wraps any seekable byte stream and reads/writes two
//! self-delimiting cell formats:
//!
//! - Fixed-width little-endian two's-complement signed integers, with the
//!   width chosen per call
//! - UTF-8 strings behind a 2-byte little-endian unsigned length prefix
//!
//! Every operation has a positional `*_at` variant that works at an absolute
//! offset and leaves the stream cursor exactly where it was before the call,
//! even when the operation fails.

pub mod error;
pub mod file;

pub use crate::error::{Error, ErrorKind};
pub use crate::file::BinaryFile;

pub type Result<T> = std::result::Result<T, Error>;
