//! New-order notification service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::error::CheckoutError;

/// Trait for queueing new-order notifications.
///
/// Delivery is fire-and-forget from the checkout's point of view; a failure
/// to queue never fails the order.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Queues the "new order" notification for a placed order.
    async fn queue_new_order(&self, order: &Order) -> Result<(), CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    queued: Vec<OrderId>,
    fail_on_queue: bool,
}

/// In-memory notification service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationService {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

impl InMemoryNotificationService {
    /// Creates a new in-memory notification service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next queue call.
    pub fn set_fail_on_queue(&self, fail: bool) {
        self.state.write().unwrap().fail_on_queue = fail;
    }

    /// Returns the number of queued notifications.
    pub fn queued_count(&self) -> usize {
        self.state.read().unwrap().queued.len()
    }

    /// Returns true if a notification was queued for the given order.
    pub fn has_queued(&self, order_id: OrderId) -> bool {
        self.state.read().unwrap().queued.contains(&order_id)
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn queue_new_order(&self, order: &Order) -> Result<(), CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_queue {
            return Err(CheckoutError::Notification(
                "notification queue unavailable".to_string(),
            ));
        }

        state.queued.push(order.id);
        Ok(())
    }
}
