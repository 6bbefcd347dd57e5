//! Repository error types
//!
//! The in-memory repository can only fail on lock poisoning; the file-backed
//! one also fails on I/O and on corrupted log frames. Corruption is never
//! ignored: a bad frame aborts the open instead of silently dropping data.

use std::io;

use thiserror::Error;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Disk I/O failure
    #[error("storage I/O failure: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Checksum mismatch or truncated frame in the storage log
    #[error("corrupted storage frame at offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// A frame payload could not be encoded or decoded
    #[error("storage encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A repository lock was poisoned by a panicking writer
    #[error("repository lock poisoned")]
    LockPoisoned,
}

impl RepositoryError {
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }
}
