//! Adapter error vocabulary.
//!
//! Every native error is translated exactly once, at the syscall site, by
//! [`FsError::from_io`]. Nothing of type `std::io::Error` leaves the adapter.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Closed error vocabulary shared by all storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// A path component used as a directory is not one.
    #[error("not a directory")]
    NotADirectory,

    /// Expected a file, found a directory.
    #[error("is a directory")]
    IsADirectory,

    /// Directory still has entries.
    #[error("directory not empty")]
    DirectoryNotEmpty,

    /// `name` does not exist inside `dir`.
    #[error("no directory entry {name:?} in {dir:?}")]
    NoDirectoryEntry {
        /// Directory that was searched.
        dir: String,
        /// Entry that was missing.
        name: String,
    },

    /// Something already occupies the path.
    #[error("file already exists")]
    FileAlreadyExists,

    /// Device or quota is full.
    #[error("no space left on device")]
    NoSpace,

    /// Backing store has no recognisable format. Never produced by the host adapter.
    #[error("format not recognised")]
    FormatNotRecognised,

    /// Catch-all for native errors without a dedicated variant.
    #[error("unknown error: {0}")]
    Unknown(String),

    /// Low-level device I/O failure.
    #[error("block device error")]
    BlockDevice,
}

impl FsError {
    /// Create a NoDirectoryEntry error for a full path.
    pub fn no_entry(path: &Path) -> Self {
        let dir = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::NoDirectoryEntry { dir, name }
    }

    /// Create an Unknown error.
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Translate a native error raised while operating on `path`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        if is_device_error(&err) {
            tracing::warn!(path = %path.display(), error = %err, "device error");
            return Self::BlockDevice;
        }

        match err.kind() {
            io::ErrorKind::NotFound => Self::no_entry(path),
            io::ErrorKind::NotADirectory => Self::NotADirectory,
            io::ErrorKind::IsADirectory => Self::IsADirectory,
            io::ErrorKind::DirectoryNotEmpty => Self::DirectoryNotEmpty,
            io::ErrorKind::AlreadyExists => Self::FileAlreadyExists,
            io::ErrorKind::StorageFull => Self::NoSpace,
            _ => {
                tracing::warn!(path = %path.display(), error = %err, "unmapped native error");
                Self::Unknown(format!("{}: {err}", path.display()))
            }
        }
    }
}

#[cfg(unix)]
fn is_device_error(err: &io::Error) -> bool {
    use rustix::io::Errno;

    matches!(
        Errno::from_io_error(err),
        Some(Errno::IO | Errno::NXIO | Errno::NODEV)
    )
}

#[cfg(not(unix))]
fn is_device_error(_err: &io::Error) -> bool {
    false
}

/// Convert FsError to std::io::Error for compatibility.
impl From<FsError> for io::Error {
    fn from(e: FsError) -> Self {
        let msg = e.to_string();
        let kind = match e {
            FsError::NotADirectory => io::ErrorKind::NotADirectory,
            FsError::IsADirectory => io::ErrorKind::IsADirectory,
            FsError::DirectoryNotEmpty => io::ErrorKind::DirectoryNotEmpty,
            FsError::NoDirectoryEntry { .. } => io::ErrorKind::NotFound,
            FsError::FileAlreadyExists => io::ErrorKind::AlreadyExists,
            FsError::NoSpace => io::ErrorKind::StorageFull,
            FsError::FormatNotRecognised => io::ErrorKind::InvalidData,
            FsError::Unknown(_) | FsError::BlockDevice => io::ErrorKind::Other,
        };
        io::Error::new(kind, msg)
    }
}

/// Adapter result type.
pub type FsResult<T> = Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_splits_path() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        let mapped = FsError::from_io(err, Path::new("/srv/data/missing.bin"));
        assert_eq!(
            mapped,
            FsError::NoDirectoryEntry {
                dir: "/srv/data".into(),
                name: "missing.bin".into(),
            }
        );
    }

    #[test]
    fn test_kind_mapping() {
        let cases = [
            (io::ErrorKind::NotADirectory, FsError::NotADirectory),
            (io::ErrorKind::IsADirectory, FsError::IsADirectory),
            (io::ErrorKind::DirectoryNotEmpty, FsError::DirectoryNotEmpty),
            (io::ErrorKind::AlreadyExists, FsError::FileAlreadyExists),
            (io::ErrorKind::StorageFull, FsError::NoSpace),
        ];
        for (kind, expected) in cases {
            assert_eq!(FsError::from_io(kind.into(), Path::new("x")), expected);
        }
    }

    #[test]
    fn test_unmapped_becomes_unknown_with_path() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        match FsError::from_io(err, Path::new("/srv/locked")) {
            FsError::Unknown(msg) => {
                assert!(msg.contains("/srv/locked"));
                assert!(msg.contains("nope"));
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_raw_errno_mapping() {
        // ENOSPC
        let err = io::Error::from_raw_os_error(28);
        assert_eq!(FsError::from_io(err, Path::new("x")), FsError::NoSpace);
        // EIO
        let err = io::Error::from_raw_os_error(5);
        assert_eq!(FsError::from_io(err, Path::new("x")), FsError::BlockDevice);
    }

    #[test]
    fn test_into_io_error() {
        let io_err: io::Error = FsError::no_entry(Path::new("a/b")).into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);

        let io_err: io::Error = FsError::NoSpace.into();
        assert_eq!(io_err.kind(), io::ErrorKind::StorageFull);
    }
}
