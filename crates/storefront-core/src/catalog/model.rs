//! Catalog state domain model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::product::{Product, ProductId};

/// Lifecycle of the product list fetch.
///
/// `Idle -> Loading -> {Success, Error}`; both terminal states may go back to
/// `Loading` on refresh or retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything UI collaborators read about the catalog.
///
/// `categories` is recomputed from `products` on every replacement and is
/// never set on its own. A failed fetch keeps the last known-good products.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    products: Arc<Vec<Product>>,
    categories: Vec<String>,
    status: FetchStatus,
    error: Option<String>,
    cache_timestamp: Option<DateTime<Utc>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Products in fetch order. The `Arc` changes identity only when the
    /// product list is replaced, which downstream memoization relies on.
    pub fn products(&self) -> &Arc<Vec<Product>> {
        &self.products
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Human-readable fetch error, present only in `FetchStatus::Error`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the currently adopted product list was fetched from the network.
    pub fn cache_timestamp(&self) -> Option<DateTime<Utc>> {
        self.cache_timestamp
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Looks up a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Enters `Loading`. Products and error stay untouched until the fetch settles.
    pub fn begin_loading(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Adopts a product list (fresh fetch or valid cache) and enters `Success`.
    pub fn succeed(&mut self, products: Arc<Vec<Product>>, fetched_at: DateTime<Utc>) {
        self.categories = derive_categories(&products);
        self.products = products;
        self.cache_timestamp = Some(fetched_at);
        self.status = FetchStatus::Success;
        self.error = None;
    }

    /// Enters `Error`, keeping the previously displayed products.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FetchStatus::Error;
        self.error = Some(message.into());
    }
}

/// Distinct category values, first appearance first.
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !categories.iter().any(|c| c == &product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, category: &str) -> Product {
        Product {
            id: ProductId::Numeric(id),
            title: format!("Product {id}"),
            category: category.to_string(),
            price: 1.0,
            image: String::new(),
            description: String::new(),
            rating: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = CatalogState::new();
        assert_eq!(state.status(), FetchStatus::Idle);
        assert!(state.products().is_empty());
        assert!(state.categories().is_empty());
        assert!(state.error().is_none());
        assert!(state.cache_timestamp().is_none());
    }

    #[test]
    fn test_derive_categories_first_appearance() {
        let products = vec![
            product(1, "electronics"),
            product(2, "jewelery"),
            product(3, "electronics"),
            product(4, "men's clothing"),
        ];
        assert_eq!(
            derive_categories(&products),
            vec!["electronics", "jewelery", "men's clothing"]
        );
    }

    #[test]
    fn test_success_then_error_keeps_products() {
        let mut state = CatalogState::new();
        state.begin_loading();
        assert!(state.is_loading());

        let products = Arc::new(vec![product(1, "a"), product(2, "b")]);
        state.succeed(products.clone(), Utc::now());
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.categories(), ["a", "b"]);

        state.begin_loading();
        state.fail("Failed to fetch products: timeout");
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.products().len(), 2);
        assert!(Arc::ptr_eq(state.products(), &products));
        assert_eq!(state.error(), Some("Failed to fetch products: timeout"));
    }

    #[test]
    fn test_success_clears_error() {
        let mut state = CatalogState::new();
        state.fail("boom");
        state.succeed(Arc::new(vec![product(1, "a")]), Utc::now());
        assert!(state.error().is_none());
        assert_eq!(state.status(), FetchStatus::Success);
    }

    #[test]
    fn test_product_lookup() {
        let mut state = CatalogState::new();
        state.succeed(Arc::new(vec![product(1, "a"), product(2, "b")]), Utc::now());
        assert_eq!(
            state.product(&ProductId::Numeric(2)).map(|p| p.category.as_str()),
            Some("b")
        );
        assert!(state.product(&ProductId::Numeric(3)).is_none());
    }

    #[test]
    fn test_serialized_keys() {
        let mut state = CatalogState::new();
        state.succeed(Arc::new(vec![product(1, "a")]), Utc::now());

        let value = serde_json::to_value(&state).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["cacheTimestamp", "categories", "error", "products", "status"]
        );
        assert_eq!(value["status"], "Success");
        assert_eq!(value["products"][0]["id"], 1);
        assert_eq!(value["categories"][0], "a");
        assert!(value["error"].is_null());
    }
}
