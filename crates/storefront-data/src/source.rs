//! Product data sources.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use storefront_commerce::catalog::Product;
use storefront_commerce::ProductId;
use tracing::{debug, info};

use crate::{FetchError, Response};

/// Public product API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where products come from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the product list.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Fetch one product by id.
    async fn fetch_product(&self, id: ProductId) -> Result<Product, FetchError>;
}

#[async_trait]
impl<T: ProductSource + ?Sized> ProductSource for Arc<T> {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        (**self).fetch_products().await
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, FetchError> {
        (**self).fetch_product(id).await
    }
}

/// Connection settings for the product API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Resolve a path against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// The product API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: Client,
    config: ApiConfig,
}

impl HttpProductSource {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get(&self, path: &str) -> Result<Response, FetchError> {
        let url = self.config.url(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%url, status = status.as_u16(), bytes = body.len(), "response");
        Ok(Response::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            body.to_vec(),
        ))
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let list = self.get("/products").await?.product_list()?;
        info!(count = list.products.len(), total = list.total, "fetched product list");
        Ok(list.products)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, FetchError> {
        let product = self.get(&format!("/products/{}", id)).await?.product(id)?;
        info!(product_id = %id, "fetched product detail");
        Ok(product)
    }
}
