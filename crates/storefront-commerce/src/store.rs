//! The state container owned by the application.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cart::{CartAction, CartState};
use crate::money::Currency;
use crate::search::{ProductsAction, ProductsState};

/// An action routed to one of the state slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Cart(CartAction),
    Products(ProductsAction),
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<ProductsAction> for Action {
    fn from(action: ProductsAction) -> Self {
        Action::Products(action)
    }
}

/// Holds the cart and products snapshots.
///
/// Dispatch runs the slice's reducer to completion and swaps in the new
/// snapshot; readers only ever see whole snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Store {
    cart: CartState,
    products: ProductsState,
}

impl Store {
    /// Create an empty store whose cart is priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            cart: CartState::new(currency),
            products: ProductsState::new(),
        }
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn products(&self) -> &ProductsState {
        &self.products
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) {
        match action.into() {
            Action::Cart(action) => {
                debug!(action = action.name(), "cart dispatch");
                self.cart = self.cart.reduce(&action);
                trace!(
                    lines = self.cart.line_count(),
                    total_quantity = self.cart.total_quantity,
                    total_amount = %self.cart.total_amount,
                    "cart updated"
                );
            }
            Action::Products(action) => {
                debug!(action = action.name(), "products dispatch");
                self.products = self.products.reduce(&action);
            }
        }
    }

    /// Reset the session: empty cart, no products.
    pub fn reset(&mut self) {
        *self = Self::new(self.cart.currency());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartProduct;
    use crate::catalog::Product;
    use crate::ids::ProductId;
    use crate::money::Money;

    #[test]
    fn test_dispatch_routes_to_slices() {
        let mut store = Store::new(Currency::USD);
        store.dispatch(ProductsAction::SetProducts(vec![Product::new(
            ProductId::new(1),
            "Red Shirt",
            10.0,
        )]));
        store.dispatch(CartAction::AddToCart(CartProduct::new(
            ProductId::new(1),
            "Red Shirt",
            Money::new(1000, Currency::USD),
            "",
        )));

        assert_eq!(store.products().products.len(), 1);
        assert_eq!(store.cart().total_quantity, 1);
    }

    #[test]
    fn test_reset_keeps_currency() {
        let mut store = Store::new(Currency::GBP);
        store.dispatch(ProductsAction::SetLoading(true));
        store.reset();

        assert_eq!(store.cart().currency(), Currency::GBP);
        assert!(!store.products().loading);
    }
}
