//! Path resolution against the handle's base directory.

use std::io;
use std::path::{Path, PathBuf};

/// Join a relative path onto the base.
///
/// Purely lexical. A leading `/` is stripped so the result always starts at
/// `base`, but `..` segments are kept as-is and can climb out of the base.
pub fn resolve(base: &Path, relative: &str) -> PathBuf {
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() {
        return base.to_path_buf();
    }
    base.join(relative)
}

/// Final component of `path`, or the whole path when it has none (e.g. `/`).
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// True for `/` (or a bare drive root on Windows).
fn is_root(path: &Path) -> bool {
    path.has_root() && path.parent().is_none()
}

/// Canonicalize `path` on the blocking pool.
pub(crate) async fn canonicalize(path: &Path) -> io::Result<PathBuf> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || dunce::canonicalize(path))
        .await
        .map_err(io::Error::other)?
}

/// Panic unless `base` is safe to wipe.
///
/// Rejects an empty path and the filesystem root. `canonical` is the
/// symlink-resolved form of `base` (or `base` itself when that cannot be
/// resolved), so `/tmp/..` is caught too.
pub fn assert_formattable(base: &Path, canonical: &Path) {
    assert!(
        !base.as_os_str().is_empty(),
        "refusing to format: base path is empty"
    );
    assert!(
        !is_root(base) && !is_root(canonical),
        "refusing to format filesystem root {}",
        base.display()
    );
}
