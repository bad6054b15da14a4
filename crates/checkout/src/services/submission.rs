//! Order submission service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Cart, Order};

use crate::error::CheckoutError;

/// Trait for the order-submission capability.
///
/// Converts a fully assembled cart into an order. `Ok(None)` is an expected,
/// reportable outcome (e.g. an inventory reservation was lost between
/// assembly and submission), distinct from a hard `Err`.
#[async_trait]
pub trait OrderSubmissionService: Send + Sync {
    /// Submits an assembled cart.
    async fn submit(&self, cart: &Cart) -> Result<Option<Order>, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemorySubmissionState {
    submissions: u32,
    fail_on_submit: bool,
    yield_no_order: bool,
}

/// In-memory order submission service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderSubmissionService {
    state: Arc<RwLock<InMemorySubmissionState>>,
}

impl InMemoryOrderSubmissionService {
    /// Creates a new in-memory submission service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail hard on the next submit call.
    pub fn set_fail_on_submit(&self, fail: bool) {
        self.state.write().unwrap().fail_on_submit = fail;
    }

    /// Configures the service to yield no order on the next submit call.
    pub fn set_yield_no_order(&self, yield_none: bool) {
        self.state.write().unwrap().yield_no_order = yield_none;
    }

    /// Returns the number of submit calls that produced an order.
    pub fn submission_count(&self) -> u32 {
        self.state.read().unwrap().submissions
    }
}

#[async_trait]
impl OrderSubmissionService for InMemoryOrderSubmissionService {
    async fn submit(&self, cart: &Cart) -> Result<Option<Order>, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_submit {
            return Err(CheckoutError::Submission(
                "order service unavailable".to_string(),
            ));
        }

        if state.yield_no_order {
            return Ok(None);
        }

        state.submissions += 1;
        Ok(Some(Order::from_cart(cart)))
    }
}
