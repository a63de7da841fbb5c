//! HttpProductSource - fetches the product list from a REST listing endpoint.
//!
//! The endpoint answers `GET <api_url>` with a JSON array of products.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use storefront_core::config::StorefrontConfig;
use storefront_core::error::{Result, StoreError};
use storefront_core::product::{Product, ProductSource};

/// Product source talking to the listing endpoint over HTTP.
#[derive(Clone)]
pub struct HttpProductSource {
    client: Client,
    api_url: String,
}

impl HttpProductSource {
    /// Creates a source for `api_url` with a request timeout.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// Creates a source from the runtime configuration.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Maps a transport or decoding failure to a transient fetch error.
fn fetch_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::fetch(format!("request timed out: {err}"))
    } else if err.is_decode() {
        StoreError::fetch(format!("unexpected response body: {err}"))
    } else {
        StoreError::fetch(err.to_string())
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        tracing::debug!(url = %self.api_url, "Fetching products");

        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::HttpStatus {
                status: status.as_u16(),
                url: self.api_url.clone(),
            });
        }

        let products: Vec<Product> = response.json().await.map_err(fetch_error)?;
        tracing::debug!(count = products.len(), "Fetched products");
        Ok(products)
    }
}
