//! Search filter types.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// A filter over the fetched product list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SearchFilter {
    /// Case-insensitive substring match on title, description or category.
    Text(String),
    /// Case-insensitive exact match on category.
    Category(String),
}

impl SearchFilter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        SearchFilter::Text(query.into())
    }

    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        SearchFilter::Category(category.into())
    }

    /// Whether the filter lets every product through.
    pub fn is_empty(&self) -> bool {
        match self {
            SearchFilter::Text(q) | SearchFilter::Category(q) => q.trim().is_empty(),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.is_empty() {
            return true;
        }
        match self {
            SearchFilter::Text(q) => matches_text(product, &q.to_lowercase()),
            SearchFilter::Category(c) => product.category.eq_ignore_ascii_case(c.trim()),
        }
    }

    /// Apply the filter, keeping the original order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        if self.is_empty() {
            return products.to_vec();
        }
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// `needle` must already be lowercased. Each field is tested on its own.
fn matches_text(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(ProductId::new(1), "Red Shirt", 20.0)
                .with_description("Cotton tee")
                .with_category("mens-shirts"),
            Product::new(ProductId::new(2), "Blue Hat", 15.0)
                .with_description("Keeps the sun off")
                .with_category("accessories"),
        ]
    }

    #[test]
    fn test_text_matches_any_field() {
        let products = catalog();
        assert_eq!(SearchFilter::text("RED").apply(&products).len(), 1);
        assert_eq!(SearchFilter::text("sun").apply(&products)[0].id, ProductId::new(2));
        assert_eq!(SearchFilter::text("shirts").apply(&products)[0].id, ProductId::new(1));
        assert!(SearchFilter::text("lamp").apply(&products).is_empty());
    }

    #[test]
    fn test_match_does_not_span_fields() {
        // "hat keeps" only exists across the title/description boundary.
        assert!(SearchFilter::text("hat keeps").apply(&catalog()).is_empty());
    }

    #[test]
    fn test_blank_filter_passes_everything() {
        assert_eq!(SearchFilter::text("   ").apply(&catalog()).len(), 2);
        assert_eq!(SearchFilter::category("").apply(&catalog()).len(), 2);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let products = catalog();
        assert_eq!(SearchFilter::category("Accessories").apply(&products).len(), 1);
        assert!(SearchFilter::category("access").apply(&products).is_empty());
    }
}
