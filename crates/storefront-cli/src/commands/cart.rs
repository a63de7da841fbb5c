use anyhow::Result;
use storefront_core::product::ProductId;

use super::{format_price, load_catalog};
use crate::app::AppState;

/// Adds each id in order; unknown ids are reported and skipped.
pub async fn add(state: &AppState, ids: &[String]) -> Result<()> {
    let catalog = load_catalog(state, false).await?;
    let cart = &state.cart_store;

    for raw in ids {
        let id = ProductId::from(raw.as_str());
        match catalog.product(&id) {
            Some(product) => {
                cart.add_to_cart(product);
            }
            None => {
                tracing::warn!(product_id = %id, "Unknown product, skipped");
                eprintln!("warning: product {id} not found");
            }
        }
    }

    let (ledger, snapshot) = cart.state();
    if ledger.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }

    for line in ledger.lines() {
        println!(
            "{:>4} x {:<48} {:>10}",
            line.amount,
            line.product.title,
            format_price(line.subtotal())
        );
    }
    println!(
        "{} items, total {}",
        snapshot.item_count,
        format_price(snapshot.total)
    );
    Ok(())
}
