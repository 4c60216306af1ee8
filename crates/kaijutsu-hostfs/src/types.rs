//! Adapter value types.

use serde::{Deserialize, Serialize};

/// Point-in-time metadata for a file or directory.
///
/// Built fresh on every `stat` call and never cached; it may be stale as soon
/// as it is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Final path component.
    pub filename: String,
    /// Always `false` for the host adapter; permission bits are not inspected.
    pub read_only: bool,
    /// True if the entry is a directory.
    pub is_directory: bool,
    /// Size in bytes.
    pub size: u64,
}

impl Stat {
    /// Build a stat record from native metadata.
    pub fn from_metadata(filename: impl Into<String>, meta: &std::fs::Metadata) -> Self {
        Self {
            filename: filename.into(),
            read_only: false,
            is_directory: meta.is_dir(),
            size: meta.len(),
        }
    }
}

/// How the recursive remover treats an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Directory,
    /// Regular files and symlinks are both unlinked.
    Unlinkable,
    /// Sockets, FIFOs, device nodes.
    Other,
}

impl From<std::fs::FileType> for EntryKind {
    fn from(ft: std::fs::FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() || ft.is_symlink() {
            EntryKind::Unlinkable
        } else {
            EntryKind::Other
        }
    }
}
