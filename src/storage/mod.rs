//! # Key/Value Storage
//!
//! The device-local store the cart is mirrored to. Each key maps to one opaque
//! string blob, read and written whole; there are no partial updates.
//!
//! - [`MemoryStorage`] keeps blobs in a map and can be told to fail, for tests.
//! - [`FileStorage`] keeps one file per key and replaces it atomically.

pub mod error;
pub mod file;
pub mod memory;

pub use error::*;
pub use file::*;
pub use memory::*;

use async_trait::async_trait;

/// An async key/value store holding whole string blobs.
///
/// Implementations must be shareable across tasks; the cart actor reads through
/// one handle while its write-behind task writes through another.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if nothing was ever written.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
