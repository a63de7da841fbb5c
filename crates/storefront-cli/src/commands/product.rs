use anyhow::{Result, bail};
use storefront_core::product::{ProductId, RELATED_PRODUCTS_LIMIT, related_products};

use super::{format_price, format_stars, load_catalog, print_product_row};
use crate::app::AppState;

pub async fn show(state: &AppState, id: &str) -> Result<()> {
    let catalog = load_catalog(state, false).await?;
    let id = ProductId::from(id);
    let Some(product) = catalog.product(&id) else {
        bail!("Product {id} not found");
    };

    println!("{}", product.title);
    println!("{}", product.category_label());
    println!("{}", format_price(product.price));
    println!(
        "{} ({} reviews)",
        format_stars(product.stars()),
        product.review_count()
    );
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    let related = related_products(catalog.products(), product, RELATED_PRODUCTS_LIMIT);
    if !related.is_empty() {
        println!();
        println!("Related products:");
        for related in related {
            print_product_row(related);
        }
    }
    Ok(())
}
