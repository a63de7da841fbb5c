//! Catalog state, fetch status machine and the persisted cache format.

pub mod cache;
pub mod model;
pub mod repository;

pub use cache::{CachedCatalog, DEFAULT_CACHE_DURATION, FETCHED_AT_KEY, PRODUCTS_KEY};
pub use model::{CatalogState, FetchStatus, derive_categories};
pub use repository::KeyValueStore;
