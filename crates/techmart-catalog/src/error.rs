//! Catalog error types.

use thiserror::Error;

/// Errors raised by client-side catalog and checkout logic.
///
/// The variant engine itself never fails; these cover the checkout and
/// order helpers, which validate input before anything is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Nothing selected for checkout.
    #[error("Checkout has no items")]
    EmptyCheckout,

    /// Invalid quantity on a checkout line.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: i64, quantity: i64 },

    /// Shipping address failed validation.
    #[error("Invalid shipping address: {0}")]
    InvalidAddress(String),

    /// A required contact field is missing.
    #[error("Missing contact field: {0}")]
    MissingContact(&'static str),

    /// Unknown numeric order status.
    #[error("Unknown order status code: {0}")]
    UnknownStatus(i32),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
