//! Checkout module.
//!
//! Contains the checkout form, the order totals and the simulated order
//! submission.

mod form;
mod order;
mod summary;

pub use form::{CheckoutForm, FieldError};
pub use order::{Checkout, OrderConfirmation, DEFAULT_SUBMIT_DELAY};
pub use summary::{OrderSummary, DEFAULT_TAX_RATE_BP};
