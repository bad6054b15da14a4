//! Projection trait for submission-time read-model updates.

use async_trait::async_trait;
use domain::Order;

use crate::Result;

/// A read model that records placed orders.
///
/// Order submission calls [`record`](OrderListing::record) once per placed
/// order as a bookkeeping side effect; implementations denormalize whatever
/// their queries need.
#[async_trait]
pub trait OrderListing: Send + Sync {
    /// Records a newly placed order.
    async fn record(&self, order: &Order) -> Result<()>;
}
