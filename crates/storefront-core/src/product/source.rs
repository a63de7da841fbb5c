//! Product source trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::product::Product;

/// The external collaborator that fetches the product list.
///
/// Any transport failure or non-success response must surface as a transient
/// error (`StoreError::Fetch` or `StoreError::HttpStatus`).
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the full product list in catalog order.
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}
