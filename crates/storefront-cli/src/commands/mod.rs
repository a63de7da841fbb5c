pub mod cache;
pub mod cart;
pub mod categories;
pub mod config;
pub mod product;
pub mod products;
pub mod refresh;
pub mod search;

use anyhow::{Result, bail};
use storefront_application::PageResult;
use storefront_core::catalog::{CatalogState, FetchStatus};
use storefront_core::product::{Product, StarBreakdown};

use crate::app::AppState;

/// Loads the catalog, tolerating a failed fetch while older products exist.
pub(crate) async fn load_catalog(state: &AppState, force_refresh: bool) -> Result<CatalogState> {
    let catalog = state.catalog_store.fetch_products(force_refresh).await;

    if catalog.status() == FetchStatus::Error {
        let message = catalog.error().unwrap_or("unknown error");
        if catalog.products().is_empty() {
            bail!("Could not load products: {message}");
        }
        eprintln!("warning: {message}; showing the last loaded products");
    }

    Ok(catalog)
}

pub(crate) fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub(crate) fn format_stars(stars: StarBreakdown) -> String {
    let mut out = String::new();
    out.extend(std::iter::repeat_n('★', usize::from(stars.full)));
    out.extend(std::iter::repeat_n('⯪', usize::from(stars.half)));
    out.extend(std::iter::repeat_n('☆', usize::from(stars.empty)));
    out
}

pub(crate) fn print_product_row(product: &Product) {
    println!(
        "{:>6}  {:<48}  {:>10}  {}",
        product.id.to_string(),
        truncate(&product.title, 48),
        format_price(product.price),
        product.category_label()
    );
}

pub(crate) fn print_page(result: &PageResult) {
    if result.items.is_empty() {
        println!("No products match.");
        return;
    }
    for product in &result.items {
        print_product_row(product);
    }

    let view = &result.view;
    let range = view.item_range();
    println!(
        "-- page {}/{} ({}-{} of {}){}{}",
        view.current_page(),
        view.total_pages(),
        range.start + 1,
        range.end,
        view.total_items(),
        if view.has_previous() { "  [prev]" } else { "" },
        if view.has_next() { "  [next]" } else { "" },
    );
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stars() {
        let stars = StarBreakdown {
            full: 3,
            half: 1,
            empty: 1,
        };
        assert_eq!(format_stars(stars), "★★★⯪☆");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(9.9), "$9.90");
    }
}
