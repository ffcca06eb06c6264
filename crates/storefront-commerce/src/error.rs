//! Commerce error types.

use thiserror::Error;

use crate::checkout::FieldError;

/// Errors that can occur in storefront operations.
///
/// Cart and search reducers never surface these to callers; they absorb
/// invalid input and log the rejection. Checkout and the value types use
/// them directly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product id could not be parsed.
    #[error("Invalid product ID provided: {0:?}")]
    InvalidProductId(String),

    /// Negative or otherwise unusable price.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {}", join_fields(.0))]
    ValidationError(Vec<FieldError>),

    /// Malformed product record.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: u64, reason: String },
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
