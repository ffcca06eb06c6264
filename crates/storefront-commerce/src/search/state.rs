//! Products state: the fetched list, the search term and the filtered view.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::search::SearchFilter;

/// An intent against the products state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductsAction {
    SetProducts(Vec<Product>),
    SetSearchTerm(String),
    SetLoading(bool),
    SetError(Option<String>),
    ClearSearch,
}

impl ProductsAction {
    pub fn name(&self) -> &'static str {
        match self {
            ProductsAction::SetProducts(_) => "set_products",
            ProductsAction::SetSearchTerm(_) => "set_search_term",
            ProductsAction::SetLoading(_) => "set_loading",
            ProductsAction::SetError(_) => "set_error",
            ProductsAction::ClearSearch => "clear_search",
        }
    }
}

/// Products state.
///
/// `filtered_products` is rebuilt from `products` whenever the search term
/// is written. Replacing the list resets the view to the full list and
/// keeps the stored term; callers re-dispatch the term to filter again.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductsState {
    /// All products from the API.
    pub products: Vec<Product>,
    pub search_term: String,
    pub filtered_products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProductsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action and return the resulting state.
    pub fn reduce(&self, action: &ProductsAction) -> Self {
        match action {
            ProductsAction::SetProducts(list) => self.set_products(list.clone()),
            ProductsAction::SetSearchTerm(term) => self.set_search_term(term.clone()),
            ProductsAction::SetLoading(flag) => self.set_loading(*flag),
            ProductsAction::SetError(message) => self.set_error(message.clone()),
            ProductsAction::ClearSearch => self.clear_search(),
        }
    }

    /// Replace the product list; the filtered view becomes the full list.
    pub fn set_products(&self, products: Vec<Product>) -> Self {
        Self {
            filtered_products: products.clone(),
            products,
            error: None,
            ..self.clone()
        }
    }

    /// Store the term and rebuild the filtered view.
    pub fn set_search_term(&self, term: impl Into<String>) -> Self {
        let term = term.into();
        let filtered_products = SearchFilter::text(term.as_str()).apply(&self.products);
        debug!(
            term = %term,
            matches = filtered_products.len(),
            total = self.products.len(),
            "search term updated"
        );
        Self {
            search_term: term,
            filtered_products,
            ..self.clone()
        }
    }

    pub fn set_loading(&self, loading: bool) -> Self {
        Self {
            loading,
            ..self.clone()
        }
    }

    /// Store an error message; this always ends loading.
    pub fn set_error(&self, error: Option<String>) -> Self {
        Self {
            error,
            loading: false,
            ..self.clone()
        }
    }

    pub fn clear_search(&self) -> Self {
        self.set_search_term(String::new())
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            let category = product.category.as_str();
            if !category.is_empty() && !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }
}
