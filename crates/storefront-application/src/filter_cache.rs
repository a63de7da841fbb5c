//! Memoized filter and sort.
//!
//! Results are keyed on the product list identity (`Arc` pointer), the
//! category, the search term and the sort order. When only the sort order
//! changed, the unsorted filter result is re-sorted instead of filtering
//! again. Output always equals `filter_and_sort` over the same inputs.

use std::sync::Arc;

use storefront_core::filter::{CategoryFilter, FilterSpec, SortOrder, filter_products, sort_products};
use storefront_core::product::Product;

/// Work counters, used to observe the fast paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCacheStats {
    pub filter_passes: u64,
    pub sort_passes: u64,
    pub hits: u64,
}

#[derive(Debug)]
struct FilterKey {
    products: Arc<Vec<Product>>,
    category: CategoryFilter,
    term: String,
}

impl FilterKey {
    fn matches(&self, products: &Arc<Vec<Product>>, category: &CategoryFilter, term: &str) -> bool {
        Arc::ptr_eq(&self.products, products) && self.category == *category && self.term == term
    }
}

#[derive(Debug)]
struct CachedResult {
    key: FilterKey,
    /// Filter output in catalog order.
    filtered: Vec<Product>,
    sort: SortOrder,
    sorted: Vec<Product>,
}

#[derive(Debug, Default)]
pub struct FilterCache {
    cached: Option<CachedResult>,
    stats: FilterCacheStats,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered and sorted view of `products`.
    pub fn get(&mut self, products: &Arc<Vec<Product>>, spec: &FilterSpec, term: &str) -> &[Product] {
        let reusable = self
            .cached
            .as_ref()
            .is_some_and(|cached| cached.key.matches(products, &spec.category, term));

        if !reusable {
            let filtered = filter_products(products, &spec.category, term);
            self.stats.filter_passes += 1;
            let mut sorted = filtered.clone();
            sort_products(&mut sorted, spec.sort);
            self.stats.sort_passes += 1;
            tracing::trace!(
                matched = filtered.len(),
                total = products.len(),
                "Filter cache recomputed"
            );
            self.cached = Some(CachedResult {
                key: FilterKey {
                    products: Arc::clone(products),
                    category: spec.category.clone(),
                    term: term.to_string(),
                },
                filtered,
                sort: spec.sort,
                sorted,
            });
        }

        let Some(cached) = self.cached.as_mut() else {
            return &[];
        };

        if reusable {
            if cached.sort == spec.sort {
                self.stats.hits += 1;
            } else {
                // Start from catalog order so ties keep their original order
                let mut sorted = cached.filtered.clone();
                sort_products(&mut sorted, spec.sort);
                self.stats.sort_passes += 1;
                cached.sort = spec.sort;
                cached.sorted = sorted;
            }
        }

        &cached.sorted
    }

    pub fn stats(&self) -> FilterCacheStats {
        self.stats
    }
}
