//! Shopping cart module.
//!
//! Contains the cart state, its line items and the cart reducer.

mod cart;

pub use cart::{clamp_purchase_quantity, CartAction, CartLineItem, CartProduct, CartState};
