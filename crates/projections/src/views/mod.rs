//! Read model views.

mod order_listing;

pub use order_listing::{OrderListingRow, OrderListingView};
