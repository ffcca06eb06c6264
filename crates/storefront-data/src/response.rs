//! HTTP response handling and payload validation.

use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_commerce::catalog::{Product, ProductList};
use storefront_commerce::ProductId;

use crate::FetchError;

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// Canonical reason phrase, e.g. "Not Found".
    pub status_text: String,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, status_text: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Validation(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Http {
                status: self.status,
                status_text: self.status_text,
            })
        }
    }

    /// Decode a list endpoint payload.
    ///
    /// `products` must be present and an array, and every entry must be a
    /// well-formed product.
    pub fn product_list(self) -> Result<ProductList, FetchError> {
        let invalid = || FetchError::Validation("Invalid API response structure".to_string());

        let value: Value = self.error_for_status()?.json().map_err(|_| invalid())?;
        if !value.get("products").is_some_and(Value::is_array) {
            return Err(invalid());
        }

        let list: ProductList = serde_json::from_value(value)
            .map_err(|e| FetchError::Validation(format!("Invalid product data: {}", e)))?;
        for product in &list.products {
            product.validate()?;
        }
        Ok(list)
    }

    /// Decode a detail endpoint payload for `id`.
    pub fn product(self, id: ProductId) -> Result<Product, FetchError> {
        if self.status == 404 {
            return Err(FetchError::NotFound(id));
        }

        let invalid = || FetchError::Validation("Invalid product data received".to_string());

        let value: Value = self.error_for_status()?.json().map_err(|_| invalid())?;
        if !value.get("id").is_some_and(is_present_id) {
            return Err(invalid());
        }

        let product: Product = serde_json::from_value(value).map_err(|_| invalid())?;
        product.validate()?;
        Ok(product)
    }
}

/// An id counts as present unless it is null, zero, empty or false.
fn is_present_id(id: &Value) -> bool {
    match id {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> Response {
        Response::new(200, "OK", body.as_bytes().to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(ok("").is_success());
        assert!(Response::new(204, "No Content", vec![]).is_success());
        assert!(!Response::new(301, "Moved Permanently", vec![]).is_success());
        assert!(!Response::new(500, "Internal Server Error", vec![]).is_success());
    }

    #[test]
    fn test_error_for_status() {
        let err = Response::new(503, "Service Unavailable", vec![])
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Http {
                status: 503,
                status_text: "Service Unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_product_list_decodes() {
        let list = ok(r#"{
            "products": [
                {"id": 1, "title": "Mascara", "price": 9.99, "category": "beauty"},
                {"id": 2, "title": "Eyeshadow", "price": 19.99, "category": "beauty"}
            ],
            "total": 194, "skip": 0, "limit": 30
        }"#)
        .product_list()
        .unwrap();

        assert_eq!(list.products.len(), 2);
        assert_eq!(list.total, 194);
    }

    #[test]
    fn test_product_list_requires_products_array() {
        let expected = FetchError::Validation("Invalid API response structure".to_string());
        assert_eq!(ok(r#"{"items": []}"#).product_list().unwrap_err(), expected);
        assert_eq!(ok(r#"{"products": {}}"#).product_list().unwrap_err(), expected);
        assert_eq!(ok("not json").product_list().unwrap_err(), expected);
    }

    #[test]
    fn test_product_list_rejects_malformed_entries() {
        let err = ok(r#"{"products": [{"id": 1, "price": 3.0}]}"#)
            .product_list()
            .unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));

        let err = ok(r#"{"products": [{"id": 1, "title": "Lamp", "price": -3.0}]}"#)
            .product_list()
            .unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));
    }

    #[test]
    fn test_product_list_http_error() {
        let err = Response::new(500, "Internal Server Error", vec![])
            .product_list()
            .unwrap_err();
        assert_eq!(err.user_message(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_product_detail_not_found() {
        let err = Response::new(404, "Not Found", br#"{"message":"missing"}"#.to_vec())
            .product(ProductId::new(999))
            .unwrap_err();
        assert_eq!(err, FetchError::NotFound(ProductId::new(999)));
        assert_eq!(err.user_message(), "Product not found");
    }

    #[test]
    fn test_product_detail_requires_id() {
        let err = ok(r#"{"title": "Lamp", "price": 3.0}"#)
            .product(ProductId::new(1))
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Validation("Invalid product data received".to_string())
        );
    }

    #[test]
    fn test_product_detail_rejects_zero_id() {
        for body in [
            r#"{"id": 0, "title": "Lamp", "price": 3.0}"#,
            r#"{"id": null, "title": "Lamp", "price": 3.0}"#,
        ] {
            let err = ok(body).product(ProductId::new(0)).unwrap_err();
            assert_eq!(
                err,
                FetchError::Validation("Invalid product data received".to_string())
            );
        }
    }

    #[test]
    fn test_product_detail_decodes_gallery() {
        let product = ok(r#"{
            "id": 5, "title": "Chair", "price": 120.0, "brand": "Oak & Co",
            "images": ["a.png", "b.png"], "category": "furniture"
        }"#)
        .product(ProductId::new(5))
        .unwrap();

        assert_eq!(product.images, vec!["a.png", "b.png"]);
        assert_eq!(product.brand.as_deref(), Some("Oak & Co"));
    }
}
