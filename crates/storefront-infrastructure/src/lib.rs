pub mod config_service;
pub mod http_product_source;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http_product_source::HttpProductSource;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
