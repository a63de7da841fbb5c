use anyhow::Result;
use storefront_application::CatalogBrowser;
use storefront_core::filter::{CategoryFilter, FilterSpec, SortOrder};

use super::{load_catalog, print_page};
use crate::app::AppState;

pub struct ProductQuery {
    pub category: CategoryFilter,
    pub sort: SortOrder,
    pub search: String,
    pub page: usize,
    pub refresh: bool,
}

pub async fn list(state: &AppState, query: ProductQuery, json: bool) -> Result<()> {
    let catalog = load_catalog(state, query.refresh).await?;

    if let CategoryFilter::Only(category) = &query.category
        && !catalog.categories().iter().any(|c| c == category)
    {
        eprintln!(
            "warning: unknown category {category:?}; known: {}",
            catalog.categories().join(", ")
        );
    }

    let mut browser = CatalogBrowser::new(state.config.per_page);
    browser.set_filter(FilterSpec::new(query.category, query.sort));
    browser.set_search_term(query.search);
    browser.set_page(query.page);
    let result = browser.view(catalog.products());

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_page(&result);
    }
    Ok(())
}
