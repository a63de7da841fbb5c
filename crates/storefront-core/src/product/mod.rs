//! Product records as served by the remote catalog.

pub mod model;
pub mod source;

pub use model::{
    Product, ProductId, RELATED_PRODUCTS_LIMIT, Rating, StarBreakdown, category_label,
    related_products,
};
pub use source::ProductSource;
