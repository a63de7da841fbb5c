use std::sync::Arc;

use storefront_application::{CartStore, CatalogStore};
use storefront_core::config::StorefrontConfig;
use storefront_infrastructure::ConfigService;

/// Stores and configuration shared by every command.
pub struct AppState {
    pub config: StorefrontConfig,
    pub config_service: Arc<ConfigService>,
    pub cart_store: Arc<CartStore>,
    pub catalog_store: Arc<CatalogStore>,
}
