//! Denormalized read models for the checkout bridge.
//!
//! Order submission writes a flattened listing row per placed order; the
//! listing backs order display and search without touching the aggregates.

pub mod error;
pub mod projection;
pub mod read_model;
pub mod views;

pub use error::{ProjectionError, Result};
pub use projection::OrderListing;
pub use read_model::ReadModel;
pub use views::{OrderListingRow, OrderListingView};
