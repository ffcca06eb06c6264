//! Product API error types.

use storefront_commerce::{CommerceError, ProductId};
use thiserror::Error;

/// Message shown for any transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error - Please check your internet connection";

/// Errors that can occur when fetching from the product API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    /// Payload is missing expected fields or has the wrong shape.
    #[error("{0}")]
    Validation(String),

    /// 404 on the detail endpoint.
    #[error("Product not found")]
    NotFound(ProductId),

    /// Unusable route parameter, e.g. a non-numeric product id.
    #[error("Invalid product ID provided")]
    InvalidInput(String),
}

impl FetchError {
    /// Whether the failure happened below HTTP.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Timeout)
    }

    /// Human-readable text stored in state for the presentation layer.
    pub fn user_message(&self) -> String {
        if self.is_network() {
            NETWORK_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<CommerceError> for FetchError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::InvalidProductId(raw) => FetchError::InvalidInput(raw),
            other => FetchError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_share_one_message() {
        let network = FetchError::Network("connection refused".to_string());
        assert_eq!(network.user_message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(FetchError::Timeout.user_message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_http_error_message_carries_status() {
        let err = FetchError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert!(!err.is_network());
        assert_eq!(err.user_message(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_invalid_product_id_becomes_input_error() {
        let err: FetchError = CommerceError::InvalidProductId("abc".to_string()).into();
        assert_eq!(err, FetchError::InvalidInput("abc".to_string()));
    }
}
