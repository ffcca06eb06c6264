//! Search module.
//!
//! Contains the products state and the filters applied to it.

mod filter;
mod state;

pub use filter::SearchFilter;
pub use state::{ProductsAction, ProductsState};
