use anyhow::{Result, anyhow};

use crate::app::AppState;

pub async fn clear(state: &AppState) -> Result<()> {
    state
        .catalog_store
        .clear_cache()
        .await
        .map_err(|e| anyhow!("Failed to clear catalog cache: {}", e))?;
    println!("Catalog cache cleared");
    Ok(())
}
