//! Cart state and its reducer.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// The fields of a product the cart needs when it is added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub thumbnail: String,
}

impl CartProduct {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Money,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            thumbnail: thumbnail.into(),
        }
    }

    /// Snapshot a catalog product at its current price.
    pub fn from_product(product: &Product, currency: Currency) -> Self {
        Self::new(
            product.id,
            product.title.clone(),
            product.price_money(currency),
            product.thumbnail.clone(),
        )
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Id of the product this line holds; unique within a cart.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price captured on the first add.
    pub price: Money,
    /// Image reference.
    pub image: String,
    /// Quantity, at least 1 while the line exists.
    pub quantity: i64,
    /// Running total. Repeat adds accumulate the price passed on each add,
    /// so this can differ from `price * quantity`.
    pub total_price: Money,
}

impl CartLineItem {
    /// Difference between the running total and `price * quantity`.
    pub fn drift(&self) -> Result<Money, CommerceError> {
        let expected = self.price.checked_mul(self.quantity)?;
        self.total_price.checked_sub(&expected)
    }
}

/// An intent against the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartAction {
    AddToCart(CartProduct),
    RemoveFromCart(ProductId),
    UpdateQuantity { id: ProductId, quantity: i64 },
    /// Several units at once, as from a quantity picker.
    AddQuantity { product: CartProduct, count: u32 },
    /// Quantity stepper; below 1 removes the line.
    StepQuantity { id: ProductId, quantity: i64 },
    ClearCart,
}

impl CartAction {
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::AddToCart(_) => "add_to_cart",
            CartAction::RemoveFromCart(_) => "remove_from_cart",
            CartAction::UpdateQuantity { .. } => "update_quantity",
            CartAction::AddQuantity { .. } => "add_quantity",
            CartAction::StepQuantity { .. } => "step_quantity",
            CartAction::ClearCart => "clear_cart",
        }
    }
}

/// Shopping cart state.
///
/// `total_quantity` is the sum of line quantities and `total_amount` the sum
/// of line `total_price`s. Both are maintained incrementally by the
/// operations below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    /// Line items in insertion order.
    pub items: Vec<CartLineItem>,
    pub total_quantity: i64,
    pub total_amount: Money,
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl CartState {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total_quantity: 0,
            total_amount: Money::zero(currency),
        }
    }

    pub fn currency(&self) -> Currency {
        self.total_amount.currency
    }

    /// Apply an action and return the resulting cart.
    pub fn reduce(&self, action: &CartAction) -> Self {
        match action {
            CartAction::AddToCart(product) => self.add_to_cart(product),
            CartAction::RemoveFromCart(id) => self.remove_from_cart(*id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(*id, *quantity),
            CartAction::AddQuantity { product, count } => self.add_quantity(product, *count),
            CartAction::StepQuantity { id, quantity } => self.step_quantity(*id, *quantity),
            CartAction::ClearCart => self.clear_cart(),
        }
    }

    /// Add one unit of `product`.
    ///
    /// A repeat add bumps the quantity and adds `product.price` to the line's
    /// running total. The stored unit price stays the one from the first add.
    /// No stock bound is enforced.
    pub fn add_to_cart(&self, product: &CartProduct) -> Self {
        self.transition("add_to_cart", |cart| cart.apply_add(product))
    }

    /// Add `count` units of `product`, one add at a time.
    pub fn add_quantity(&self, product: &CartProduct, count: u32) -> Self {
        (0..count).fold(self.clone(), |cart, _| cart.add_to_cart(product))
    }

    /// Remove a line item entirely. No-op if absent.
    pub fn remove_from_cart(&self, id: ProductId) -> Self {
        self.transition("remove_from_cart", |cart| cart.apply_remove(id))
    }

    /// Set a line item's quantity.
    ///
    /// A positive quantity recomputes the line total as `price * quantity`.
    /// Zero removes the line. Negative quantities are ignored.
    pub fn update_quantity(&self, id: ProductId, quantity: i64) -> Self {
        if quantity < 0 {
            debug!(product_id = %id, quantity, "ignoring negative quantity");
            return self.clone();
        }
        if quantity == 0 {
            return self.remove_from_cart(id);
        }
        self.transition("update_quantity", |cart| cart.apply_update(id, quantity))
    }

    /// Quantity stepper: anything below 1 removes the line.
    pub fn step_quantity(&self, id: ProductId, new_quantity: i64) -> Self {
        if new_quantity < 1 {
            self.remove_from_cart(id)
        } else {
            self.update_quantity(id, new_quantity)
        }
    }

    /// Empty the cart, keeping its currency.
    pub fn clear_cart(&self) -> Self {
        Self::new(self.currency())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Check that the aggregates equal the sums over the line items.
    pub fn verify_totals(&self) -> bool {
        let quantity: i64 = self.items.iter().map(|i| i.quantity).sum();
        let amount = Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency());
        quantity == self.total_quantity && matches!(amount, Ok(a) if a == self.total_amount)
    }

    /// Drift of one line item; see [`CartLineItem::drift`].
    pub fn drift(&self, id: ProductId) -> Option<Money> {
        self.get(id).and_then(|item| item.drift().ok())
    }

    fn transition(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut Self) -> Result<(), CommerceError>,
    ) -> Self {
        let mut next = self.clone();
        match apply(&mut next) {
            Ok(()) => next,
            Err(e) => {
                warn!(operation, error = %e, "rejected cart input");
                self.clone()
            }
        }
    }

    fn apply_add(&mut self, product: &CartProduct) -> Result<(), CommerceError> {
        if product.price.is_negative() {
            return Err(CommerceError::InvalidPrice(product.price.display()));
        }

        let total_amount = self.total_amount.checked_add(&product.price)?;
        let total_quantity = self
            .total_quantity
            .checked_add(1)
            .ok_or(CommerceError::Overflow)?;

        match self.items.iter_mut().find(|i| i.id == product.id) {
            Some(existing) => {
                let total_price = existing.total_price.checked_add(&product.price)?;
                existing.quantity = existing
                    .quantity
                    .checked_add(1)
                    .ok_or(CommerceError::Overflow)?;
                existing.total_price = total_price;
            }
            None => self.items.push(CartLineItem {
                id: product.id,
                title: product.title.clone(),
                price: product.price,
                image: product.thumbnail.clone(),
                quantity: 1,
                total_price: product.price,
            }),
        }

        self.total_quantity = total_quantity;
        self.total_amount = total_amount;
        Ok(())
    }

    fn apply_remove(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            return Ok(());
        };
        let item = &self.items[pos];
        let total_amount = self.total_amount.checked_sub(&item.total_price)?;
        self.total_quantity -= item.quantity;
        self.total_amount = total_amount;
        self.items.remove(pos);
        Ok(())
    }

    fn apply_update(&mut self, id: ProductId, quantity: i64) -> Result<(), CommerceError> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(());
        };

        let new_total = item.price.checked_mul(quantity)?;
        let total_amount = self
            .total_amount
            .checked_sub(&item.total_price)?
            .checked_add(&new_total)?;
        let total_quantity = self
            .total_quantity
            .checked_add(quantity - item.quantity)
            .ok_or(CommerceError::Overflow)?;

        item.quantity = quantity;
        item.total_price = new_total;
        self.total_quantity = total_quantity;
        self.total_amount = total_amount;
        Ok(())
    }
}

/// Clamp a requested purchase quantity to `1..=stock`.
///
/// A product reporting no stock still allows a single unit, matching the
/// detail view's quantity picker.
pub fn clamp_purchase_quantity(requested: u32, stock: u32) -> u32 {
    requested.clamp(1, stock.max(1))
}
