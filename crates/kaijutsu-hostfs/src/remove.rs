//! Recursive removal.
//!
//! Children of a directory are removed concurrently on the calling task and
//! awaited together before the directory itself goes. Nothing is rolled back:
//! if one branch fails, whatever was already removed stays removed.

use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt, join_all};
use tokio::fs;

use crate::error::{FsError, FsResult};
use crate::types::EntryKind;

/// Remove `path` and, if it is a directory, everything below it.
pub(crate) fn remove_tree(path: PathBuf) -> BoxFuture<'static, FsResult<()>> {
    async move {
        let meta = fs::symlink_metadata(&path)
            .await
            .map_err(|e| FsError::from_io(e, &path))?;

        match EntryKind::from(meta.file_type()) {
            EntryKind::Directory => {
                remove_children(&path).await?;
                fs::remove_dir(&path)
                    .await
                    .map_err(|e| FsError::from_io(e, &path))
            }
            EntryKind::Unlinkable => fs::remove_file(&path)
                .await
                .map_err(|e| FsError::from_io(e, &path)),
            EntryKind::Other => Err(FsError::unknown(format!(
                "{}: cannot remove special file",
                path.display()
            ))),
        }
    }
    .boxed()
}

/// Remove every entry inside `dir`, leaving `dir` itself in place.
///
/// All children are attempted; the first failure (in listing order) is returned.
pub(crate) async fn remove_children(dir: &Path) -> FsResult<()> {
    let children = child_paths(dir).await?;
    tracing::trace!(dir = %dir.display(), count = children.len(), "removing children");

    join_all(children.into_iter().map(remove_tree))
        .await
        .into_iter()
        .collect()
}

async fn child_paths(dir: &Path) -> FsResult<Vec<PathBuf>> {
    let mut read_dir = fs::read_dir(dir)
        .await
        .map_err(|e| FsError::from_io(e, dir))?;

    let mut children = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| FsError::from_io(e, dir))?
    {
        children.push(entry.path());
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_tree(root: &Path) {
        std::fs::create_dir_all(root.join("a/b/c")).unwrap();
        std::fs::write(root.join("a/one.txt"), b"1").unwrap();
        std::fs::write(root.join("a/b/two.txt"), b"22").unwrap();
        std::fs::write(root.join("a/b/c/three.txt"), b"333").unwrap();
    }

    #[tokio::test]
    async fn test_remove_tree_directory() {
        let dir = TempDir::new().unwrap();
        build_tree(dir.path());

        remove_tree(dir.path().join("a")).await.unwrap();
        assert!(!dir.path().join("a").exists());
        assert!(dir.path().exists());
    }

    #[tokio::test]
    async fn test_remove_tree_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.bin");
        std::fs::write(&file, b"x").unwrap();

        remove_tree(file.clone()).await.unwrap();
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_remove_tree_missing() {
        let dir = TempDir::new().unwrap();
        let err = remove_tree(dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, FsError::NoDirectoryEntry { ref name, .. } if name == "nope"));
    }

    #[tokio::test]
    async fn test_remove_children_keeps_dir() {
        let dir = TempDir::new().unwrap();
        build_tree(dir.path());
        std::fs::write(dir.path().join("top.txt"), b"t").unwrap();

        remove_children(dir.path()).await.unwrap();
        assert!(dir.path().is_dir());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_is_unlinked_not_followed() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("keep");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("precious.txt"), b"p").unwrap();

        let doomed = dir.path().join("doomed");
        std::fs::create_dir(&doomed).unwrap();
        std::os::unix::fs::symlink(&target, doomed.join("link")).unwrap();

        remove_tree(doomed.clone()).await.unwrap();
        assert!(!doomed.exists());
        assert!(target.join("precious.txt").exists());
    }
}
