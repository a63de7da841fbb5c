//! Persisted catalog cache.
//!
//! Sole reader and writer of the catalog keys in the key-value store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use storefront_core::catalog::{CachedCatalog, FETCHED_AT_KEY, KeyValueStore, PRODUCTS_KEY};
use storefront_core::error::Result;
use storefront_core::product::Product;

pub struct CatalogCache {
    store: Arc<dyn KeyValueStore>,
}

impl CatalogCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads the cached catalog.
    ///
    /// Missing entries, unreadable storage and corrupt entries all return
    /// `None`; the caller falls through to the network.
    pub async fn load(&self) -> Option<CachedCatalog> {
        let entries = async {
            let products = self.store.get(PRODUCTS_KEY).await?;
            let fetched_at = self.store.get(FETCHED_AT_KEY).await?;
            Result::Ok(products.zip(fetched_at))
        }
        .await;

        let (products, fetched_at) = match entries {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                tracing::debug!("Catalog cache is empty");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read catalog cache, treating as miss");
                return None;
            }
        };

        match CachedCatalog::decode(&products, &fetched_at) {
            Ok(cached) => Some(cached),
            Err(e) => {
                tracing::warn!(error = %e, "Catalog cache is corrupt, treating as miss");
                None
            }
        }
    }

    /// Persists `products` as the new cache, fetched at `fetched_at`.
    ///
    /// The product array is written before the timestamp, so an interrupted
    /// save never pairs a new timestamp with old products.
    pub async fn save(&self, products: &[Product], fetched_at: DateTime<Utc>) -> Result<()> {
        let (json, timestamp) = CachedCatalog::encode(products, fetched_at)?;
        self.store.remove(FETCHED_AT_KEY).await?;
        self.store.set(PRODUCTS_KEY, &json).await?;
        self.store.set(FETCHED_AT_KEY, &timestamp).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(FETCHED_AT_KEY).await?;
        self.store.remove(PRODUCTS_KEY).await
    }
}
