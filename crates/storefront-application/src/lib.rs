//! Application layer for the storefront.
//!
//! This crate owns the shared stores (cart and catalog) and the browsing
//! session that UI collaborators read from and forward actions to.

pub mod cart_store;
pub mod catalog_browser;
pub mod catalog_cache;
pub mod catalog_store;
pub mod debouncer;
pub mod filter_cache;

pub use cart_store::CartStore;
pub use catalog_browser::{CatalogBrowser, PageResult};
pub use catalog_cache::CatalogCache;
pub use catalog_store::CatalogStore;
pub use debouncer::{DebouncedCallback, Debouncer};
pub use filter_cache::{FilterCache, FilterCacheStats};
