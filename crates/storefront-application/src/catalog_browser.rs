//! Browsing session over the catalog: filter, search term and current page.
//!
//! Changing the filter or the search term resets the page to 1. Changing the
//! page leaves the filter alone. Each view clamps the page into the range of
//! the current result, so the stored page never points past the end.

use std::num::NonZeroUsize;
use std::sync::Arc;

use serde::Serialize;
use storefront_core::filter::{CategoryFilter, DEFAULT_PER_PAGE, FilterSpec, PageView, SortOrder};
use storefront_core::product::Product;

use crate::filter_cache::{FilterCache, FilterCacheStats};

/// One page of results with its paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub items: Vec<Product>,
    pub view: PageView,
}

#[derive(Debug)]
pub struct CatalogBrowser {
    spec: FilterSpec,
    search_term: String,
    page: usize,
    per_page: NonZeroUsize,
    cache: FilterCache,
}

impl CatalogBrowser {
    pub fn new(per_page: NonZeroUsize) -> Self {
        Self {
            spec: FilterSpec::identity(),
            search_term: String::new(),
            page: 1,
            per_page,
            cache: FilterCache::new(),
        }
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Requested page; clamped on the next [`CatalogBrowser::view`].
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> NonZeroUsize {
        self.per_page
    }

    pub fn set_filter(&mut self, spec: FilterSpec) {
        if self.spec != spec {
            self.spec = spec;
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        let spec = self.spec.clone().with_category(category);
        self.set_filter(spec);
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        let spec = self.spec.clone().with_sort(sort);
        self.set_filter(spec);
    }

    /// Applies a settled search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if self.search_term != term {
            self.search_term = term;
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Current page of `products` under the active filter and search term.
    pub fn view(&mut self, products: &Arc<Vec<Product>>) -> PageResult {
        let ordered = self.cache.get(products, &self.spec, &self.search_term);
        let view = PageView::new(self.page, self.per_page, ordered.len());
        let items = ordered[view.item_range()].to_vec();

        if view.current_page() != self.page {
            tracing::debug!(
                requested = self.page,
                clamped = view.current_page(),
                "Page clamped to result range"
            );
            self.page = view.current_page();
        }

        PageResult { items, view }
    }

    pub fn cache_stats(&self) -> FilterCacheStats {
        self.cache.stats()
    }
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}
