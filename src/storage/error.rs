//! Error types for storage backends.

use thiserror::Error;

/// A read or write against the backing store failed.
///
/// These never reach cart callers: the actor and its persister log them and
/// carry on with the in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying file system call failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
