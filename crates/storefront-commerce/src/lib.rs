//! Storefront domain types and state reducers.
//!
//! This crate holds the client-side state of the storefront:
//!
//! - **Catalog**: Products as served by the public product API
//! - **Cart**: Line items with running quantity and amount aggregates
//! - **Search**: The fetched product list, search term and filtered view
//! - **Checkout**: The checkout form and the simulated order submission
//! - **Store**: The container that owns both state slices and dispatches actions
//!
//! Every reducer takes the current snapshot and returns a new one; nothing is
//! mutated in place outside the call.
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let shirt = CartProduct::new(
//!     ProductId::new(1),
//!     "Red Shirt",
//!     Money::new(1000, Currency::USD),
//!     "https://cdn.example.com/shirt.png",
//! );
//!
//! let cart = CartState::default()
//!     .add_to_cart(&shirt)
//!     .add_to_cart(&shirt);
//!
//! assert_eq!(cart.total_quantity, 2);
//! assert_eq!(cart.total_amount.amount_cents, 2000);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use store::{Action, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, ProductList, StockStatus};

    // Cart
    pub use crate::cart::{
        clamp_purchase_quantity, CartAction, CartLineItem, CartProduct, CartState,
    };

    // Search
    pub use crate::search::{ProductsAction, ProductsState, SearchFilter};

    // Checkout
    pub use crate::checkout::{Checkout, CheckoutForm, FieldError, OrderConfirmation, OrderSummary};

    // Store
    pub use crate::store::{Action, Store};
}
