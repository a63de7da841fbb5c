//! Interactive search.
//!
//! Each stdin line becomes the new search term. Terms go through a debouncer,
//! so a burst of lines (pasted input, fast typing) renders once.

use std::sync::Arc;

use anyhow::Result;
use storefront_application::{CatalogBrowser, Debouncer};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{load_catalog, print_page};
use crate::app::AppState;

pub async fn interactive(state: &AppState) -> Result<()> {
    let catalog = load_catalog(state, false).await?;
    let products = Arc::clone(catalog.products());
    eprintln!(
        "{} products loaded. Type a search term per line, Ctrl-D to quit.",
        products.len()
    );

    let debouncer = Debouncer::new(state.config.search_debounce());
    let mut settled = debouncer.subscribe();
    let per_page = state.config.per_page;

    let renderer = tokio::spawn(async move {
        let mut browser = CatalogBrowser::new(per_page);
        while settled.changed().await.is_ok() {
            let term = settled.borrow_and_update().clone().unwrap_or_default();
            tracing::debug!(term = %term, "Search settled");
            browser.set_search_term(term);
            println!();
            print_page(&browser.view(&products));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        debouncer.push(line.trim().to_string());
    }

    // Let the last term settle before closing the channel
    while debouncer.is_pending() {
        tokio::time::sleep(debouncer.delay()).await;
    }
    drop(debouncer);
    renderer.await?;

    Ok(())
}
