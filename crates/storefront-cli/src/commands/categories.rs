use anyhow::Result;
use storefront_core::product::category_label;

use super::load_catalog;
use crate::app::AppState;

pub async fn list(state: &AppState) -> Result<()> {
    let catalog = load_catalog(state, false).await?;

    for category in catalog.categories() {
        let count = catalog
            .products()
            .iter()
            .filter(|p| &p.category == category)
            .count();
        println!("{:<24} {:>4}  ({})", category_label(category), count, category);
    }
    Ok(())
}
