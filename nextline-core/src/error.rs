//! Error types for line reading

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Fatal outcome of a `read_line` call
///
/// Running out of data and asking for an unusable descriptor are not errors;
/// both surface as `Ok(None)`. Every variant here means the pending state of
/// the descriptor involved has already been released.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The underlying read primitive failed
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    /// The pending buffer could not grow
    #[error("failed to grow pending buffer by {additional} bytes")]
    Alloc {
        /// Number of bytes that were requested on top of the current length
        additional: usize,
        /// Allocator failure
        #[source]
        source: TryReserveError,
    },
}

impl ReadError {
    /// Underlying I/O error, if this was a read failure
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            ReadError::Io(err) => Some(err),
            ReadError::Alloc { .. } => None,
        }
    }
}

/// Rejected reader configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A registry bounded to zero descriptors could never track anything
    #[error("max_descriptors must be greater than 0")]
    ZeroDescriptors,

    /// Chunk size above the supported ceiling
    #[error("chunk_size {requested} exceeds the maximum of {max} bytes")]
    ChunkTooLarge {
        /// Requested chunk size
        requested: i64,
        /// Largest accepted chunk size
        max: i64,
    },
}

/// Result type for line reading
pub type Result<T> = std::result::Result<T, ReadError>;
