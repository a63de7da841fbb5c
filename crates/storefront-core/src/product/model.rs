//! Product domain model.
//!
//! Products are created by the remote catalog and never mutated locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a product as assigned by the remote catalog.
///
/// The listing endpoint uses integers, but string identifiers are accepted so
/// that alternative catalogs can be plugged in without a schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Numeric(id) => write!(f, "{}", id),
            ProductId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId::Numeric(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        // Command-line and URL input arrive as text; keep numeric ids numeric.
        match id.parse::<u64>() {
            Ok(numeric) => ProductId::Numeric(numeric),
            Err(_) => ProductId::Text(id.to_string()),
        }
    }
}

/// Customer rating attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average rating, 0 to 5.
    pub rate: f64,
    /// Number of reviews.
    pub count: u64,
}

/// How a rating renders on a five-star scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl Rating {
    pub const MAX_STARS: u8 = 5;

    /// Splits the rate into full, half and empty stars.
    ///
    /// A half star is shown when the fractional part is at least 0.5.
    /// Rates outside 0..=5 are clamped first.
    pub fn stars(&self) -> StarBreakdown {
        let rate = if self.rate.is_finite() {
            self.rate.clamp(0.0, f64::from(Self::MAX_STARS))
        } else {
            0.0
        };
        let full = rate.floor() as u8;
        let half = u8::from(full < Self::MAX_STARS && rate.fract() >= 0.5);
        StarBreakdown {
            full,
            half,
            empty: Self::MAX_STARS - full - half,
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Star breakdown for display. A product without a rating shows five empty stars.
    pub fn stars(&self) -> StarBreakdown {
        self.rating.unwrap_or_default().stars()
    }

    /// Number of reviews, zero when the product carries no rating.
    pub fn review_count(&self) -> u64 {
        self.rating.map(|r| r.count).unwrap_or(0)
    }

    /// Display label of the product's category.
    pub fn category_label(&self) -> String {
        category_label(&self.category)
    }
}

/// Capitalizes the first character of a category for display.
///
/// ```
/// use storefront_core::product::category_label;
///
/// assert_eq!(category_label("men's clothing"), "Men's clothing");
/// assert_eq!(category_label(""), "");
/// ```
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Products of the same category as `product`, excluding `product` itself.
///
/// Catalog order is preserved and at most `limit` products are returned.
pub fn related_products<'a>(
    products: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|candidate| candidate.category == product.category && candidate.id != product.id)
        .take(limit)
        .collect()
}

/// Default number of related products shown next to a product.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;
