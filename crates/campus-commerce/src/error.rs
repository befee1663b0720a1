//! Commerce error types.

use thiserror::Error;

/// Errors raised by the cart, catalog, order and rating operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Quantity is not a positive count.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Size or color is not offered for the product.
    #[error("Invalid selection for {product_id}: size {size:?}, color {color:?}")]
    InvalidSelection {
        product_id: String,
        size: String,
        color: String,
    },

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Star rating outside 1..=5.
    #[error("Invalid rating: {0} (expected 1 to 5 stars)")]
    InvalidRating(i64),

    /// Review submitted for a product that was never purchased.
    #[error("Product {0} has not been purchased")]
    NotPurchased(String),

    /// Invalid order status transition.
    #[error("Invalid order transition from {from} to {to}")]
    InvalidOrderTransition { from: String, to: String },

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

