//! Key-value store trait backing the persisted catalog cache.

use async_trait::async_trait;

use crate::error::Result;

/// String key-value storage.
///
/// Only the catalog cache reads or writes the catalog keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for `key`, or `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
