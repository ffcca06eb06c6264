//! Simulated order submission.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::CartAction;
use crate::checkout::{CheckoutForm, OrderSummary, DEFAULT_TAX_RATE_BP};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::store::Store;

/// Default time the simulated submission takes.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// What the customer sees after placing an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub customer: String,
    pub email: String,
    /// Units ordered.
    pub item_count: i64,
    pub summary: OrderSummary,
    pub masked_card: String,
    pub placed_at: DateTime<Utc>,
}

/// Places orders against the session store.
///
/// No payment processor is contacted; submission waits a fixed delay and
/// then empties the cart.
#[derive(Debug, Clone)]
pub struct Checkout {
    submit_delay: Duration,
    tax_rate_bp: i64,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl Checkout {
    pub fn new(submit_delay: Duration) -> Self {
        Self {
            submit_delay,
            tax_rate_bp: DEFAULT_TAX_RATE_BP,
        }
    }

    /// Tax rate in basis points.
    pub fn with_tax_rate(mut self, tax_rate_bp: i64) -> Self {
        self.tax_rate_bp = tax_rate_bp;
        self
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay
    }

    /// Totals the customer would pay for the current cart.
    pub fn summary(&self, store: &Store) -> Result<OrderSummary, CommerceError> {
        OrderSummary::for_cart(store.cart(), self.tax_rate_bp)
    }

    /// Check that an order could be placed right now.
    pub fn ready(&self, store: &Store, form: &CheckoutForm) -> Result<(), CommerceError> {
        if store.cart().is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(CommerceError::ValidationError(errors));
        }
        Ok(())
    }

    /// Submit the order and clear the cart.
    pub async fn submit(
        &self,
        store: &mut Store,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CommerceError> {
        self.ready(store, form)?;

        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            customer: form.full_name(),
            email: form.email.trim().to_string(),
            item_count: store.cart().total_quantity,
            summary: self.summary(store)?,
            masked_card: form.masked_card(),
            placed_at: Utc::now(),
        };

        tokio::time::sleep(self.submit_delay).await;

        store.dispatch(CartAction::ClearCart);
        info!(
            order_id = %confirmation.order_id,
            items = confirmation.item_count,
            total = %confirmation.summary.grand_total,
            "order placed"
        );
        Ok(confirmation)
    }
}
