//! Host adapter configuration.
//!
//! Stored as RON, e.g. `hostfs.ron`:
//!
//! ```ron
//! (
//!     base: "~/.local/share/kaijutsu/store",
//!     canonicalize: true,
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration for a host directory adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFsConfig {
    /// Base directory. `~` and `$VAR` are expanded.
    pub base: String,

    /// Resolve symlinks in the base at connect time.
    #[serde(default)]
    pub canonicalize: bool,
}

impl HostFsConfig {
    /// Create a config for the given base directory.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            canonicalize: false,
        }
    }

    /// Set whether the base is canonicalized at connect time.
    pub fn with_canonicalize(mut self, canonicalize: bool) -> Self {
        self.canonicalize = canonicalize;
        self
    }

    /// Parse a RON config.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a RON config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron(&text)
    }

    /// The base directory with `~` and environment variables expanded.
    pub fn base_path(&self) -> Result<PathBuf, ConfigError> {
        let expanded = shellexpand::full(&self.base)
            .map_err(|e| ConfigError::Expand(e.to_string()))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

/// Errors from loading a [`HostFsConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid RON.
    #[error("failed to parse config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Base path references an unset variable.
    #[error("failed to expand base path: {0}")]
    Expand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ron() {
        let config =
            HostFsConfig::from_ron(r#"(base: "/srv/store", canonicalize: true)"#).unwrap();
        assert_eq!(config.base, "/srv/store");
        assert!(config.canonicalize);
    }

    #[test]
    fn test_canonicalize_defaults_off() {
        let config = HostFsConfig::from_ron(r#"(base: "/srv/store")"#).unwrap();
        assert!(!config.canonicalize);
        assert_eq!(config, HostFsConfig::new("/srv/store"));
    }

    #[test]
    fn test_bad_ron() {
        let err = HostFsConfig::from_ron("(base: 42").unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = HostFsConfig::load("/nonexistent/hostfs.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("hostfs.ron");
        std::fs::write(&file, r#"(base: "/srv/store")"#).unwrap();

        let config = HostFsConfig::load(&file).unwrap();
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/srv/store"));
    }

    #[test]
    fn test_base_path_expands_tilde() {
        let config = HostFsConfig::new("~/store");
        let path = config.base_path().unwrap();
        assert!(path.ends_with("store"));
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(path, PathBuf::from(home).join("store"));
        }
    }

    #[test]
    fn test_base_path_unset_variable() {
        let config = HostFsConfig::new("$KAIJUTSU_HOSTFS_SURELY_UNSET_VAR/store");
        assert!(matches!(config.base_path(), Err(ConfigError::Expand(_))));
    }
}
