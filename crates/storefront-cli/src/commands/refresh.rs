use anyhow::{Result, bail};
use storefront_core::catalog::FetchStatus;

use crate::app::AppState;

pub async fn run(state: &AppState) -> Result<()> {
    let catalog = state.catalog_store.refresh_products().await;

    if catalog.status() == FetchStatus::Error {
        bail!(
            "Refresh failed: {}",
            catalog.error().unwrap_or("unknown error")
        );
    }

    println!(
        "Fetched {} products in {} categories",
        catalog.products().len(),
        catalog.categories().len()
    );
    if let Some(fetched_at) = catalog.cache_timestamp() {
        println!("Cached at {}", fetched_at.to_rfc3339());
    }
    Ok(())
}
