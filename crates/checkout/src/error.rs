//! Checkout error types.

use common::CartId;
use domain::CartError;
use projections::ProjectionError;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during order creation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The referenced cart does not exist.
    #[error("cart not found: {0}")]
    CartNotFound(CartId),

    /// A cart command was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// No shipping rate could be quoted for the selected method.
    #[error("no shipping rate available for method '{method}'")]
    NoShippingRate { method: String },

    /// Shipping rate service failure.
    #[error("Shipping rate service error: {0}")]
    RateService(String),

    /// Order submission capability failure.
    #[error("Order submission error: {0}")]
    Submission(String),

    /// Notification service failure.
    #[error("Notification service error: {0}")]
    Notification(String),

    /// Storage backend failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Read model update failure.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
