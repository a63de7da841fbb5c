//! Persisted catalog cache entries and freshness policy.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Result, StoreError};
use crate::product::Product;

/// Key holding the serialized product array.
pub const PRODUCTS_KEY: &str = "catalog.products";
/// Key holding the fetch timestamp in epoch milliseconds.
pub const FETCHED_AT_KEY: &str = "catalog.fetched_at";

/// Default cache freshness window.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(5 * 60);

/// A product list read back from the persisted cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCatalog {
    pub products: Vec<Product>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedCatalog {
    /// Decodes the two raw cache entries.
    pub fn decode(products_json: &str, fetched_at_ms: &str) -> Result<Self> {
        let millis: i64 = fetched_at_ms.trim().parse().map_err(|e| {
            StoreError::cache_corruption(FETCHED_AT_KEY, format!("{e}: {fetched_at_ms:?}"))
        })?;
        let fetched_at = Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
            StoreError::cache_corruption(FETCHED_AT_KEY, format!("out of range: {millis}"))
        })?;
        let products = serde_json::from_str(products_json)
            .map_err(|e| StoreError::cache_corruption(PRODUCTS_KEY, e.to_string()))?;
        Ok(Self {
            products,
            fetched_at,
        })
    }

    /// Encodes a product list and its fetch time into the two raw entries.
    pub fn encode(products: &[Product], fetched_at: DateTime<Utc>) -> Result<(String, String)> {
        let json = serde_json::to_string(products)?;
        Ok((json, fetched_at.timestamp_millis().to_string()))
    }

    /// Age of the entry at `now`. `None` when the timestamp lies in the future.
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        (now - self.fetched_at).to_std().ok()
    }

    /// `now - fetched_at < max_age`. Future timestamps count as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age(now).is_some_and(|age| age < max_age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;
    use chrono::Duration as ChronoDuration;

    fn sample() -> Vec<Product> {
        vec![Product {
            id: ProductId::Numeric(1),
            title: "Backpack".to_string(),
            category: "bags".to_string(),
            price: 109.95,
            image: "https://example.test/1.png".to_string(),
            description: "Fits 15 laptops".to_string(),
            rating: None,
        }]
    }

    #[test]
    fn test_encode_decode() {
        let fetched_at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let (json, ts) = CachedCatalog::encode(&sample(), fetched_at).unwrap();
        assert_eq!(ts, "1700000000123");

        let cached = CachedCatalog::decode(&json, &ts).unwrap();
        assert_eq!(cached.products, sample());
        assert_eq!(cached.fetched_at, fetched_at);
    }

    #[test]
    fn test_corrupt_entries() {
        let err = CachedCatalog::decode("[not json", "1700000000000").unwrap_err();
        assert!(err.is_cache_corruption());

        let err = CachedCatalog::decode("[]", "yesterday").unwrap_err();
        match err {
            StoreError::CacheCorruption { key, .. } => assert_eq!(key, FETCHED_AT_KEY),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        let window = DEFAULT_CACHE_DURATION;

        let recent = CachedCatalog {
            products: sample(),
            fetched_at: now - ChronoDuration::minutes(4),
        };
        assert!(recent.is_fresh(now, window));

        let stale = CachedCatalog {
            products: sample(),
            fetched_at: now - ChronoDuration::minutes(6),
        };
        assert!(!stale.is_fresh(now, window));

        let boundary = CachedCatalog {
            products: sample(),
            fetched_at: now - ChronoDuration::minutes(5),
        };
        assert!(!boundary.is_fresh(now, window));

        let future = CachedCatalog {
            products: sample(),
            fetched_at: now + ChronoDuration::minutes(1),
        };
        assert!(!future.is_fresh(now, window));
    }
}
