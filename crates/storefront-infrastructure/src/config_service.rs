//! Configuration service implementation.
//!
//! Loads `StorefrontConfig` from `config.toml` (see [`StorefrontPaths`]),
//! applies environment overrides, and caches the result.

use crate::paths::{ServiceType, StorefrontPaths};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use storefront_core::config::StorefrontConfig;
use storefront_core::error::{Result, StoreError};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<StorefrontConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the config file resolved by `paths`.
    pub fn new(paths: &StorefrontPaths) -> Result<Self> {
        let path = paths
            .get_path(ServiceType::Config)
            .map_err(|e| StoreError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a ConfigService reading an explicit file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the configuration, loading it from file if not cached.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn get_config(&self) -> Result<StorefrontConfig> {
        // Check if already cached
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_config()?;
        loaded.apply_env_overrides(|key| std::env::var(key).ok())?;

        // Cache it
        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_config(&self) -> Result<StorefrontConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(StorefrontConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        StorefrontConfig::from_toml(&content).map_err(|e| {
            StoreError::config(format!("Failed to load {}: {}", self.path.display(), e))
        })
    }
}
