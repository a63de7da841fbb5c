use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use storefront_application::{CartStore, CatalogStore};
use storefront_core::catalog::KeyValueStore;
use storefront_core::product::ProductSource;
use storefront_infrastructure::paths::{ServiceType, StorefrontPaths};
use storefront_infrastructure::{
    ConfigService, FileKeyValueStore, HttpProductSource, InMemoryKeyValueStore,
};

use crate::app::AppState;

pub struct BootstrapOptions {
    /// Base directory replacing the platform directories.
    pub data_dir: Option<PathBuf>,
    /// Persist the catalog cache on disk; otherwise it lives for one run.
    pub persistent_cache: bool,
}

pub struct AppBootstrap {
    pub app_state: AppState,
}

/// Composition root: loads configuration and wires adapters into the stores.
pub async fn bootstrap(options: &BootstrapOptions) -> Result<AppBootstrap> {
    let paths = StorefrontPaths::new(options.data_dir.as_deref());

    let config_service = Arc::new(
        ConfigService::new(&paths).map_err(|e| anyhow!("Failed to resolve config path: {}", e))?,
    );
    let config = config_service
        .get_config()
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    tracing::info!(
        path = %config_service.path().display(),
        api_url = %config.api_url,
        "[Bootstrap] Configuration loaded"
    );

    let source: Arc<dyn ProductSource> = Arc::new(
        HttpProductSource::from_config(&config)
            .map_err(|e| anyhow!("Failed to create product source: {}", e))?,
    );

    let cache_store: Arc<dyn KeyValueStore> = if options.persistent_cache {
        let dir = paths
            .get_path(ServiceType::KeyValueCache)
            .map_err(|e| anyhow!("Failed to resolve cache directory: {}", e))?;
        tracing::info!(dir = %dir.display(), "[Bootstrap] Using file cache");
        Arc::new(FileKeyValueStore::new(dir))
    } else {
        tracing::info!("[Bootstrap] Using in-memory cache");
        Arc::new(InMemoryKeyValueStore::new())
    };

    let catalog_store = Arc::new(CatalogStore::with_cache_duration(
        source,
        cache_store,
        config.cache_duration(),
    ));
    let cart_store = Arc::new(CartStore::new());

    Ok(AppBootstrap {
        app_state: AppState {
            config,
            config_service,
            cart_store,
            catalog_store,
        },
    })
}
