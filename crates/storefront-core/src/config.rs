//! Runtime configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::filter::DEFAULT_PER_PAGE;

pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com/products";

/// Environment variable overriding `api_url`.
pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
/// Environment variable overriding `cache_duration_secs`.
pub const ENV_CACHE_SECS: &str = "STOREFRONT_CACHE_SECS";

/// Root configuration, read from `config.toml`.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Product-listing endpoint.
    pub api_url: String,
    /// How long a fetched catalog stays fresh.
    pub cache_duration_secs: u64,
    /// Page size of the product listing.
    pub per_page: NonZeroUsize,
    /// Delay before search input is applied.
    pub search_debounce_ms: u64,
    /// HTTP timeout for the product fetch.
    pub request_timeout_secs: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_duration_secs: 300,
            per_page: DEFAULT_PER_PAGE,
            search_debounce_ms: 300,
            request_timeout_secs: 10,
        }
    }
}

impl StorefrontConfig {
    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(StoreError::config("api_url must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(StoreError::config("request_timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Applies environment overrides through `lookup` (usually `std::env::var`).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(secs) = lookup(ENV_CACHE_SECS) {
            self.cache_duration_secs = secs.trim().parse().map_err(|_| {
                StoreError::config(format!("{ENV_CACHE_SECS} must be a number of seconds, got {secs:?}"))
            })?;
        }
        self.validate()
    }
}
