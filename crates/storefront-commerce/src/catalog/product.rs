//! Product types as served by the product API.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Stock above this level is shown as plainly in stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock availability classification for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }
}

/// A product in the catalog.
///
/// Read-only: products are replaced wholesale whenever the list is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier assigned by the product API.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Category slug (e.g., "beauty").
    #[serde(default)]
    pub category: String,
    /// Price as a decimal amount.
    pub price: f64,
    /// Discount percentage, 0-100.
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average rating, 0-5.
    #[serde(default)]
    pub rating: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Brand name, absent for some products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Gallery image URLs (detail endpoint).
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Create a product with the listing fields; the rest default to empty.
    pub fn new(id: ProductId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price,
            discount_percentage: 0.0,
            rating: 0.0,
            stock: 0,
            brand: None,
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_discount(mut self, discount_percentage: f64) -> Self {
        self.discount_percentage = discount_percentage;
        self
    }

    /// Price as money in the given currency.
    pub fn price_money(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }

    /// Price before the discount was applied.
    ///
    /// The API serves the discounted price; the list price is recovered as
    /// `price / (1 - discount / 100)`.
    pub fn original_price(&self) -> f64 {
        if self.discount_percentage <= 0.0 || self.discount_percentage >= 100.0 {
            return self.price;
        }
        self.price / (1.0 - self.discount_percentage / 100.0)
    }

    pub fn stock_status(&self) -> StockStatus {
        match self.stock {
            0 => StockStatus::OutOfStock,
            s if s > LOW_STOCK_THRESHOLD => StockStatus::InStock,
            _ => StockStatus::LowStock,
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Check the ranges the API promises.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidProduct {
            id: self.id.get(),
            reason: reason.to_string(),
        };

        if self.title.trim().is_empty() {
            return Err(invalid("empty title"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(invalid("price must be a non-negative number"));
        }
        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(invalid("discount percentage outside 0-100"));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(invalid("rating outside 0-5"));
        }
        Ok(())
    }
}

/// Payload of the product list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductList {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_product() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "A popular mascara.",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "tags": ["beauty", "mascara"],
            "brand": "Essence",
            "thumbnail": "https://cdn.dummyjson.com/thumb.png",
            "images": ["https://cdn.dummyjson.com/1.png"]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category, "beauty");
        assert_eq!(product.brand.as_deref(), Some("Essence"));
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.price_money(Currency::USD).amount_cents, 999);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let product: Product =
            serde_json::from_str(r#"{"id": 3, "title": "Widget", "price": 2.5}"#).unwrap();
        assert!(product.brand.is_none());
        assert_eq!(product.stock, 0);
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_original_price() {
        let product = Product::new(ProductId::new(1), "Lamp", 80.0).with_discount(20.0);
        assert!((product.original_price() - 100.0).abs() < 1e-9);

        let product = Product::new(ProductId::new(2), "Rug", 50.0);
        assert_eq!(product.original_price(), 50.0);
    }

    #[test]
    fn test_stock_status() {
        let p = Product::new(ProductId::new(1), "Lamp", 1.0);
        assert_eq!(p.clone().with_stock(0).stock_status(), StockStatus::OutOfStock);
        assert_eq!(p.clone().with_stock(10).stock_status(), StockStatus::LowStock);
        assert_eq!(p.clone().with_stock(11).stock_status(), StockStatus::InStock);
        assert!(!p.is_available());
    }

    #[test]
    fn test_validate() {
        let ok = Product::new(ProductId::new(1), "Lamp", 10.0);
        assert!(ok.validate().is_ok());

        let negative = Product::new(ProductId::new(2), "Lamp", -1.0);
        assert!(negative.validate().is_err());

        let untitled = Product::new(ProductId::new(3), "  ", 1.0);
        assert!(untitled.validate().is_err());

        let discount = ok.clone().with_discount(120.0);
        assert!(discount.validate().is_err());
    }
}
