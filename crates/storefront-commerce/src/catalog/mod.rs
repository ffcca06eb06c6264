//! Product catalog module.
//!
//! Contains the product types served by the product API.

mod product;

pub use product::{Product, ProductList, StockStatus, LOW_STOCK_THRESHOLD};
