//! External service traits and in-memory implementations for the checkout
//! pipeline.

pub mod notification;
pub mod rates;
pub mod submission;

pub use notification::{InMemoryNotificationService, NotificationService};
pub use rates::{InMemoryShippingRateService, ShippingRate, ShippingRateService};
pub use submission::{InMemoryOrderSubmissionService, OrderSubmissionService};
