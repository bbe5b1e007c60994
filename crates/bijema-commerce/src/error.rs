//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Input did not have the expected shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Checkout attempted without a delivery address.
    #[error("Please select a delivery address")]
    MissingAddress,

    /// Checkout attempted with nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// Unknown payment method.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Unknown order status.
    #[error("Unknown order status: {0}")]
    UnknownOrderStatus(String),

    /// Unknown cart action.
    #[error("Unknown cart action: {0}")]
    UnknownCartAction(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
