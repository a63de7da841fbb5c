pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod product;

// Re-export common error type
pub use error::StoreError;
