//! Unified path management for storefront configuration and cache files.
//!
//! ```text
//! ~/.config/storefront/        # Config directory
//! └── config.toml              # StorefrontConfig
//!
//! ~/.cache/storefront/         # Cache directory
//! └── kv/                      # FileKeyValueStore entries
//!     ├── catalog.products.json
//!     └── catalog.fetched_at.json
//! ```
//!
//! When a base directory is given (tests, `--data-dir`), both trees live
//! under it as `config/` and `cache/`.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "storefront";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform directory could not be determined.
    DirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

/// Files and directories managed by storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// `config.toml`
    Config,
    /// Directory of the persisted key-value cache.
    KeyValueCache,
}

/// Resolves storefront paths, optionally rebased onto an explicit directory.
#[derive(Debug, Clone, Default)]
pub struct StorefrontPaths {
    base_dir: Option<PathBuf>,
}

impl StorefrontPaths {
    /// `None` uses the platform directories (XDG on Linux, Library on macOS, AppData on Windows).
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the storefront configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::DirNotFound("config")),
        }
    }

    /// Returns the storefront cache directory.
    pub fn cache_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.join("cache")),
            None => dirs::cache_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::DirNotFound("cache")),
        }
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        match service {
            ServiceType::Config => Ok(self.config_dir()?.join("config.toml")),
            ServiceType::KeyValueCache => Ok(self.cache_dir()?.join("kv")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebased_paths() {
        let paths = StorefrontPaths::new(Some(Path::new("/tmp/storefront-test")));
        assert_eq!(
            paths.get_path(ServiceType::Config).unwrap(),
            PathBuf::from("/tmp/storefront-test/config/config.toml")
        );
        assert_eq!(
            paths.get_path(ServiceType::KeyValueCache).unwrap(),
            PathBuf::from("/tmp/storefront-test/cache/kv")
        );
    }

    #[test]
    fn test_platform_paths_end_with_app_dir() {
        let paths = StorefrontPaths::new(None);
        if let Ok(dir) = paths.config_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }
}
