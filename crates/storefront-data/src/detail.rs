//! Product detail loading.

use storefront_commerce::catalog::Product;
use storefront_commerce::ProductId;
use tracing::warn;

use crate::{FetchError, ProductSource};

/// Outcome of loading one product.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loaded(Box<Product>),
    Failed(String),
}

/// Parse a product id route parameter.
pub fn parse_product_id(raw: &str) -> Result<ProductId, FetchError> {
    if raw.trim().is_empty() {
        return Err(FetchError::InvalidInput(raw.to_string()));
    }
    Ok(raw.parse::<ProductId>()?)
}

/// Message shown on the detail view for a failed load.
pub fn detail_error_message(error: &FetchError) -> String {
    match error {
        FetchError::Http {
            status,
            status_text,
        } => format!("Failed to fetch product: {} {}", status, status_text),
        other => other.user_message(),
    }
}

/// Loads a single product for the detail view.
pub struct ProductDetailLoader<S> {
    source: S,
}

impl<S: ProductSource> ProductDetailLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Parse `raw_id` and fetch the product.
    pub async fn fetch(&self, raw_id: &str) -> Result<Product, FetchError> {
        let id = parse_product_id(raw_id)?;
        self.source.fetch_product(id).await
    }

    /// Like [`fetch`](Self::fetch), with errors turned into display text.
    pub async fn load(&self, raw_id: &str) -> DetailState {
        match self.fetch(raw_id).await {
            Ok(product) => DetailState::Loaded(Box::new(product)),
            Err(e) => {
                warn!(raw_id, error = %e, "product detail failed");
                DetailState::Failed(detail_error_message(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("12").unwrap(), ProductId::new(12));
        assert!(matches!(parse_product_id(""), Err(FetchError::InvalidInput(_))));
        assert!(matches!(parse_product_id("abc"), Err(FetchError::InvalidInput(_))));
        assert!(matches!(parse_product_id("4x"), Err(FetchError::InvalidInput(_))));
    }

    #[test]
    fn test_detail_error_messages() {
        let http = FetchError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(
            detail_error_message(&http),
            "Failed to fetch product: 500 Internal Server Error"
        );
        assert_eq!(
            detail_error_message(&FetchError::NotFound(ProductId::new(3))),
            "Product not found"
        );
        assert_eq!(
            detail_error_message(&FetchError::InvalidInput("x".to_string())),
            "Invalid product ID provided"
        );
    }
}
