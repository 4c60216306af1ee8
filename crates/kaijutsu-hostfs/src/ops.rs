//! Storage adapter operations trait.
//!
//! The framework talks to every backing store through this trait. All
//! operations are path-based and take explicit offsets, so an adapter keeps no
//! per-file state between calls.

use async_trait::async_trait;

use crate::error::FsResult;
use crate::types::Stat;

/// Operations on a connected adapter handle.
///
/// Paths are relative to the handle's base directory.
#[async_trait]
pub trait FsOps: Send + Sync {
    /// Read up to `length` bytes starting at `offset`.
    ///
    /// Returns fewer bytes if EOF is reached.
    async fn read(&self, path: &str, offset: u64, length: usize) -> FsResult<Vec<u8>>;

    /// Write all of `data` at `offset`, creating the file and its parents if needed.
    async fn write(&self, path: &str, offset: u64, data: &[u8]) -> FsResult<()>;

    /// Create an empty file if none exists. Never truncates.
    async fn create(&self, path: &str) -> FsResult<()>;

    /// Create a directory and any missing parents.
    async fn mkdir(&self, path: &str) -> FsResult<()>;

    /// Get metadata for a path.
    async fn stat(&self, path: &str) -> FsResult<Stat>;

    /// List entry names in a directory. A missing directory lists as empty.
    async fn listdir(&self, path: &str) -> FsResult<Vec<String>>;

    /// Remove a file or an entire directory tree.
    async fn destroy(&self, path: &str) -> FsResult<()>;

    /// Remove everything under the base directory.
    async fn format(&self) -> FsResult<()>;

    /// Check if a path exists.
    async fn exists(&self, path: &str) -> bool {
        self.stat(path).await.is_ok()
    }
}
