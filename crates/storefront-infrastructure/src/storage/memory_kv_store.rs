use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use storefront_core::catalog::KeyValueStore;
use storefront_core::error::Result;
use tokio::sync::RwLock;

/// In-memory key-value store.
///
/// Used for ephemeral sessions (`--no-cache`) and tests. Clones share the
/// same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = InMemoryKeyValueStore::new();
        let clone = store.clone();

        store.set("a", "1").await.unwrap();
        assert_eq!(clone.get("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(clone.len().await, 1);

        clone.remove("a").await.unwrap();
        assert!(store.is_empty().await);
    }
}
