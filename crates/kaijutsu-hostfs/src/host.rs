//! Host directory adapter.
//!
//! Forwards every operation to the host filesystem under a fixed base
//! directory. No path sanitization is done beyond joining onto the base.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use crate::config::HostFsConfig;
use crate::error::{FsError, FsResult};
use crate::ops::FsOps;
use crate::path::{assert_formattable, canonicalize, file_name, resolve};
use crate::remove::{remove_children, remove_tree};
use crate::types::Stat;

/// Handle to a host directory.
///
/// All operations are relative to `base`. For example, if `base` is
/// `/srv/store`, then `read("blobs/a.bin", ..)` reads
/// `/srv/store/blobs/a.bin`.
///
/// The handle holds no open files; each operation opens and closes what it
/// needs.
#[derive(Debug, Clone)]
pub struct HostFs {
    base: PathBuf,
}

impl HostFs {
    /// Connect to an existing directory.
    ///
    /// Fails with [`FsError::NoDirectoryEntry`] if the path does not exist and
    /// [`FsError::NotADirectory`] if it is not a directory.
    pub async fn connect(identifier: impl AsRef<Path>) -> FsResult<Self> {
        let base = identifier.as_ref().to_path_buf();
        let meta = fs::metadata(&base)
            .await
            .map_err(|e| FsError::from_io(e, &base))?;
        if !meta.is_dir() {
            return Err(FsError::NotADirectory);
        }

        tracing::info!(base = %base.display(), "connected host directory");
        Ok(Self { base })
    }

    /// Connect using a [`HostFsConfig`].
    pub async fn from_config(config: &HostFsConfig) -> FsResult<Self> {
        let mut base = config
            .base_path()
            .map_err(|e| FsError::unknown(e.to_string()))?;

        if config.canonicalize {
            base = canonicalize(&base)
                .await
                .map_err(|e| FsError::from_io(e, &base))?;
        }

        Self::connect(base).await
    }

    /// Release the handle. Nothing is held open, so this cannot fail.
    pub fn disconnect(self) {
        tracing::info!(base = %self.base.display(), "disconnected host directory");
    }

    /// Get the base path.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve a relative path against the base.
    pub fn resolve(&self, path: &str) -> PathBuf {
        resolve(&self.base, path)
    }

    async fn ensure_parent(full_path: &Path) -> FsResult<()> {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FsError::from_io(e, parent))?;
        }
        Ok(())
    }

    async fn open_for_write(full_path: &Path) -> FsResult<fs::File> {
        Self::ensure_parent(full_path).await?;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(full_path)
            .await
            .map_err(|e| FsError::from_io(e, full_path))
    }
}

#[async_trait]
impl FsOps for HostFs {
    async fn read(&self, path: &str, offset: u64, length: usize) -> FsResult<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!(path = %full_path.display(), offset, length, "read");
        // Reads only report missing entries or Unknown.
        let io_err = |e| match FsError::from_io(e, &full_path) {
            FsError::IsADirectory => {
                FsError::unknown(format!("{}: is a directory", full_path.display()))
            }
            other => other,
        };

        let mut file = fs::File::open(&full_path).await.map_err(io_err)?;
        file.seek(std::io::SeekFrom::Start(offset))
            .await
            .map_err(io_err)?;

        let mut buffer = Vec::with_capacity(length.min(64 * 1024));
        file.take(length as u64)
            .read_to_end(&mut buffer)
            .await
            .map_err(io_err)?;

        Ok(buffer)
    }

    async fn write(&self, path: &str, offset: u64, data: &[u8]) -> FsResult<()> {
        let full_path = self.resolve(path);
        tracing::debug!(path = %full_path.display(), offset, len = data.len(), "write");
        let io_err = |e| FsError::from_io(e, &full_path);

        let mut file = Self::open_for_write(&full_path).await?;
        file.seek(std::io::SeekFrom::Start(offset))
            .await
            .map_err(io_err)?;

        // Short writes are progress, not failure; keep going until drained.
        let mut remaining = data;
        while !remaining.is_empty() {
            let written = file.write(remaining).await.map_err(io_err)?;
            if written == 0 {
                return Err(FsError::unknown(format!(
                    "{}: write made no progress with {} bytes left",
                    full_path.display(),
                    remaining.len()
                )));
            }
            remaining = &remaining[written..];
        }

        file.flush().await.map_err(io_err)?;
        Ok(())
    }

    async fn create(&self, path: &str) -> FsResult<()> {
        let full_path = self.resolve(path);
        tracing::debug!(path = %full_path.display(), "create");
        Self::open_for_write(&full_path).await?;
        Ok(())
    }

    async fn mkdir(&self, path: &str) -> FsResult<()> {
        let full_path = self.resolve(path);
        tracing::debug!(path = %full_path.display(), "mkdir");
        fs::create_dir_all(&full_path)
            .await
            .map_err(|e| FsError::from_io(e, &full_path))
    }

    async fn stat(&self, path: &str) -> FsResult<Stat> {
        let full_path = self.resolve(path);
        tracing::debug!(path = %full_path.display(), "stat");

        // A file in the middle of the path means the entry cannot exist.
        let meta = fs::metadata(&full_path).await.map_err(|e| {
            match FsError::from_io(e, &full_path) {
                FsError::NotADirectory => FsError::no_entry(&full_path),
                other => other,
            }
        })?;
        Ok(Stat::from_metadata(file_name(&full_path), &meta))
    }

    async fn listdir(&self, path: &str) -> FsResult<Vec<String>> {
        let full_path = self.resolve(path);
        tracing::debug!(path = %full_path.display(), "listdir");
        let io_err = |e| FsError::from_io(e, &full_path);

        let mut dir = match fs::read_dir(&full_path).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_err(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(io_err)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name != "." && name != ".." {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    async fn destroy(&self, path: &str) -> FsResult<()> {
        let full_path = self.resolve(path);
        tracing::debug!(path = %full_path.display(), "destroy");
        remove_tree(full_path).await
    }

    async fn format(&self) -> FsResult<()> {
        let canonical = canonicalize(&self.base)
            .await
            .unwrap_or_else(|_| self.base.clone());
        assert_formattable(&self.base, &canonical);
        tracing::info!(base = %self.base.display(), "formatting host directory");
        remove_children(&self.base).await
    }
}
