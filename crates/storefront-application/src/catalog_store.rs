//! Catalog store: fetch lifecycle, time-boxed cache and fetch status machine.
//!
//! State is published through a `watch` channel. Fetches are serialized by an
//! async gate, so at most one network request is in flight. A forced refresh
//! that queued behind a network fetch adopts that fetch's outcome instead of
//! issuing its own request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use storefront_core::catalog::{CatalogState, DEFAULT_CACHE_DURATION, KeyValueStore};
use storefront_core::error::Result;
use storefront_core::product::ProductSource;
use tokio::sync::{Mutex, watch};

use crate::catalog_cache::CatalogCache;

pub struct CatalogStore {
    source: Arc<dyn ProductSource>,
    cache: CatalogCache,
    cache_duration: Duration,
    state: watch::Sender<CatalogState>,
    /// Held for the whole of a fetch.
    fetch_gate: Mutex<()>,
    /// Number of settled network fetches.
    network_fetches: AtomicU64,
}

impl CatalogStore {
    /// Creates an `Idle` store with the default five-minute cache window.
    pub fn new(source: Arc<dyn ProductSource>, cache_store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_cache_duration(source, cache_store, DEFAULT_CACHE_DURATION)
    }

    pub fn with_cache_duration(
        source: Arc<dyn ProductSource>,
        cache_store: Arc<dyn KeyValueStore>,
        cache_duration: Duration,
    ) -> Self {
        let (state, _) = watch::channel(CatalogState::new());
        Self {
            source,
            cache: CatalogCache::new(cache_store),
            cache_duration,
            state,
            fetch_gate: Mutex::new(()),
            network_fetches: AtomicU64::new(0),
        }
    }

    /// Loads the product list.
    ///
    /// Without `force_refresh`, a cache younger than the cache duration is
    /// adopted and no network call is made. Otherwise the store enters
    /// `Loading` and asks the product source. On failure the previous
    /// products stay visible and `error` carries the message.
    ///
    /// Returns the state after the fetch settled.
    pub async fn fetch_products(&self, force_refresh: bool) -> CatalogState {
        let observed = self.network_fetches.load(Ordering::Acquire);
        let _gate = self.fetch_gate.lock().await;

        if force_refresh && self.network_fetches.load(Ordering::Acquire) != observed {
            tracing::debug!("Refresh coalesced with a fetch that settled while waiting");
            return self.state();
        }

        if !force_refresh {
            if let Some(cached) = self.cache.load().await {
                let now = Utc::now();
                if cached.is_fresh(now, self.cache_duration) {
                    tracing::debug!(
                        products = cached.products.len(),
                        age_ms = cached.age(now).map(|age| age.as_millis() as u64),
                        "Using cached catalog"
                    );
                    self.state.send_modify(|state| {
                        state.succeed(Arc::new(cached.products), cached.fetched_at)
                    });
                    return self.state();
                }
                tracing::debug!("Catalog cache expired");
            }
        }

        self.state.send_modify(CatalogState::begin_loading);
        tracing::info!(force_refresh, "Fetching catalog");

        let result = self.source.fetch_products().await;
        match result {
            Ok(products) => {
                let fetched_at = Utc::now();
                if let Err(e) = self.cache.save(&products, fetched_at).await {
                    tracing::warn!(error = %e, "Failed to persist catalog cache");
                }
                tracing::info!(products = products.len(), "Catalog fetched");
                self.state
                    .send_modify(|state| state.succeed(Arc::new(products), fetched_at));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog fetch failed");
                self.state.send_modify(|state| state.fail(e.to_string()));
            }
        }
        self.network_fetches.fetch_add(1, Ordering::Release);

        self.state()
    }

    /// Equivalent to `fetch_products(true)`.
    pub async fn refresh_products(&self) -> CatalogState {
        self.fetch_products(true).await
    }

    /// Drops the persisted catalog so the next fetch goes to the network.
    ///
    /// Waits for an in-flight fetch, which would otherwise rewrite the cache
    /// after it settles. Products already in memory stay visible.
    pub async fn clear_cache(&self) -> Result<()> {
        let _gate = self.fetch_gate.lock().await;
        self.cache.clear().await?;
        tracing::info!("Catalog cache cleared");
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every status or product change.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn cache_duration(&self) -> Duration {
        self.cache_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use storefront_core::catalog::{CachedCatalog, FETCHED_AT_KEY, FetchStatus, PRODUCTS_KEY};
    use storefront_core::error::StoreError;
    use storefront_core::product::{Product, ProductId};
    use storefront_infrastructure::InMemoryKeyValueStore;

    fn products(n: u64) -> Vec<Product> {
        (1..=n)
            .map(|id| Product {
                id: ProductId::Numeric(id),
                title: format!("Product {id}"),
                category: if id % 2 == 0 { "even" } else { "odd" }.to_string(),
                price: id as f64,
                image: String::new(),
                description: String::new(),
                rating: None,
            })
            .collect()
    }

    /// Product source that counts calls and can be switched to fail.
    struct FakeSource {
        products: Vec<Product>,
        calls: AtomicUsize,
        failing: AtomicBool,
        delay: Duration,
    }

    impl FakeSource {
        fn new(products: Vec<Product>) -> Self {
            Self {
                products,
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
                delay: Duration::ZERO,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ProductSource for FakeSource {
        async fn fetch_products(&self) -> Result<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::fetch("connection refused"));
            }
            Ok(self.products.clone())
        }
    }

    async fn seed_cache(kv: &InMemoryKeyValueStore, products: &[Product], age: ChronoDuration) {
        let (json, ts) = CachedCatalog::encode(products, Utc::now() - age).unwrap();
        kv.set(PRODUCTS_KEY, &json).await.unwrap();
        kv.set(FETCHED_AT_KEY, &ts).await.unwrap();
    }

    #[tokio::test]
    async fn test_first_fetch_hits_network_and_fills_cache() {
        let source = Arc::new(FakeSource::new(products(3)));
        let kv = InMemoryKeyValueStore::new();
        let store = CatalogStore::new(source.clone(), Arc::new(kv.clone()));
        assert_eq!(store.state().status(), FetchStatus::Idle);

        let state = store.fetch_products(false).await;
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.products().len(), 3);
        assert_eq!(state.categories(), ["odd", "even"]);
        assert!(state.error().is_none());
        assert!(state.cache_timestamp().is_some());
        assert_eq!(source.calls(), 1);
        assert_eq!(kv.len().await, 2);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_network() {
        let source = Arc::new(FakeSource::new(products(3)));
        let kv = InMemoryKeyValueStore::new();
        seed_cache(&kv, &products(5), ChronoDuration::minutes(1)).await;

        let store = CatalogStore::new(source.clone(), Arc::new(kv));
        let state = store.fetch_products(false).await;

        assert_eq!(source.calls(), 0);
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.products().len(), 5);
    }

    #[tokio::test]
    async fn test_stale_cache_fetches() {
        let source = Arc::new(FakeSource::new(products(3)));
        let kv = InMemoryKeyValueStore::new();
        seed_cache(&kv, &products(5), ChronoDuration::minutes(6)).await;

        let store = CatalogStore::new(source.clone(), Arc::new(kv));
        let state = store.fetch_products(false).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(state.products().len(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_cache_falls_through_to_network() {
        let source = Arc::new(FakeSource::new(products(2)));
        let kv = InMemoryKeyValueStore::new();
        kv.set(PRODUCTS_KEY, "[{\"id\":").await.unwrap();
        kv.set(FETCHED_AT_KEY, &Utc::now().timestamp_millis().to_string())
            .await
            .unwrap();

        let store = CatalogStore::new(source.clone(), Arc::new(kv));
        let state = store.fetch_products(false).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.products().len(), 2);
    }

    #[tokio::test]
    async fn test_force_refresh_ignores_fresh_cache() {
        let source = Arc::new(FakeSource::new(products(3)));
        let kv = InMemoryKeyValueStore::new();
        seed_cache(&kv, &products(5), ChronoDuration::seconds(10)).await;

        let store = CatalogStore::new(source.clone(), Arc::new(kv));
        let state = store.refresh_products().await;

        assert_eq!(source.calls(), 1);
        assert_eq!(state.products().len(), 3);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_known_good_products() {
        let source = Arc::new(FakeSource::new(products(10)));
        let store = CatalogStore::new(source.clone(), Arc::new(InMemoryKeyValueStore::new()));

        store.fetch_products(false).await;
        source.set_failing(true);

        let state = store.refresh_products().await;
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.products().len(), 10);
        assert!(!state.error().unwrap_or_default().is_empty());

        // Retry recovers and clears the error
        source.set_failing(false);
        let state = store.refresh_products().await;
        assert_eq!(state.status(), FetchStatus::Success);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_clear_cache_forces_next_fetch_to_network() {
        let source = Arc::new(FakeSource::new(products(3)));
        let kv = InMemoryKeyValueStore::new();
        let store = CatalogStore::new(source.clone(), Arc::new(kv.clone()));

        store.fetch_products(false).await;
        store.fetch_products(false).await;
        assert_eq!(source.calls(), 1);

        store.clear_cache().await.unwrap();
        assert!(kv.is_empty().await);
        assert_eq!(store.state().products().len(), 3);

        let state = store.fetch_products(false).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(kv.len().await, 2);
    }

    #[tokio::test]
    async fn test_subscribers_observe_settled_state() {
        let source = Arc::new(FakeSource::new(products(1)));
        let store = CatalogStore::new(source, Arc::new(InMemoryKeyValueStore::new()));
        let mut rx = store.subscribe();

        let observer = tokio::spawn(async move {
            let mut seen = Vec::new();
            while rx.changed().await.is_ok() {
                let status = rx.borrow_and_update().status();
                seen.push(status);
                if status == FetchStatus::Success {
                    break;
                }
            }
            seen
        });

        store.fetch_products(false).await;
        let seen = observer.await.unwrap();
        assert_eq!(seen.last(), Some(&FetchStatus::Success));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_refreshes_share_one_request() {
        let mut fake = FakeSource::new(products(4));
        fake.delay = Duration::from_millis(500);
        let source = Arc::new(fake);
        let store = Arc::new(CatalogStore::new(
            source.clone(),
            Arc::new(InMemoryKeyValueStore::new()),
        ));

        let first = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.refresh_products().await })
        };
        // Let the first refresh take the gate and start its request
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(store.state().is_loading());

        let second = store.refresh_products().await;
        let first = first.await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(first.status(), FetchStatus::Success);
        assert_eq!(second.status(), FetchStatus::Success);
        assert!(Arc::ptr_eq(first.products(), second.products()));
    }
}
