//! Error types for the storefront state engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every storefront crate.
///
/// Fetch failures are transient: the catalog keeps its last known-good
/// products and the user can retry. Cache corruption never reaches the user,
/// the catalog store downgrades it to a cache miss.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum StoreError {
    /// Transport failure while talking to the product endpoint
    #[error("Failed to fetch products: {message}")]
    Fetch { message: String },

    /// The product endpoint answered with a non-success status
    #[error("Product endpoint {url} answered with status {status}")]
    HttpStatus { status: u16, url: String },

    /// A persisted cache entry could not be decoded
    #[error("Cache entry '{key}' is corrupt: {message}")]
    CacheCorruption { key: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Creates a CacheCorruption error
    pub fn cache_corruption(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CacheCorruption {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error is recoverable by retrying the fetch.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::HttpStatus { .. })
    }

    /// Check if this is a cache corruption error
    pub fn is_cache_corruption(&self) -> bool {
        matches!(self, Self::CacheCorruption { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error, used by callers that compose adapters
impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, StoreError>`.
pub type Result<T> = std::result::Result<T, StoreError>;
