//! Checkout coordinator orchestrating the order-creation pipeline.

use std::sync::Arc;

use common::{CartId, ItemId};
use domain::{CartError, Customer, Order};
use projections::OrderListing;
use store::{CartRepository, OrderRepository};

use crate::assembler;
use crate::error::CheckoutError;
use crate::request::OrderRequest;
use crate::services::rates::ShippingRateService;
use crate::services::submission::OrderSubmissionService;
use crate::services::notification::NotificationService;
use crate::state::CheckoutState;

/// The terminal result of an order-creation run.
///
/// A run that reaches the submission capability but yields no order is an
/// expected, reportable outcome, kept distinct from hard errors.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub state: CheckoutState,
    pub order: Option<Order>,
}

impl CheckoutOutcome {
    fn placed(order: Order) -> Self {
        Self {
            state: CheckoutState::Submitted,
            order: Some(order),
        }
    }

    fn submit_failed() -> Self {
        Self {
            state: CheckoutState::SubmitFailed,
            order: None,
        }
    }
}

/// Orchestrates cart reconciliation, order assembly, and submission.
///
/// Drives the checkout stage machine (reconcile → bind → collect totals →
/// submit); each stage is a hard precondition for the next, and a failure
/// aborts without attempting later stages. Partial mutations already
/// persisted are not rolled back.
pub struct CheckoutCoordinator<S, R, Sub, N>
where
    S: CartRepository + OrderRepository,
    R: ShippingRateService,
    Sub: OrderSubmissionService,
    N: NotificationService,
{
    store: S,
    rates: R,
    submission: Sub,
    notifications: N,
    listing: Arc<dyn OrderListing>,
}

impl<S, R, Sub, N> CheckoutCoordinator<S, R, Sub, N>
where
    S: CartRepository + OrderRepository,
    R: ShippingRateService,
    Sub: OrderSubmissionService,
    N: NotificationService,
{
    /// Creates a new checkout coordinator.
    pub fn new(
        store: S,
        rates: R,
        submission: Sub,
        notifications: N,
        listing: Arc<dyn OrderListing>,
    ) -> Self {
        Self {
            store,
            rates,
            submission,
            notifications,
            listing,
        }
    }

    /// Promotes a cart into an order.
    ///
    /// Returns `CheckoutOutcome::placed` with the order on success, or a
    /// `SubmitFailed` outcome when the submission capability yields no
    /// order. Submission is not idempotent; an already-submitted cart is
    /// rejected up front.
    #[tracing::instrument(skip(self, customer, request), fields(cart_id = %cart_id))]
    pub async fn place_order(
        &self,
        cart_id: CartId,
        customer: Option<&Customer>,
        request: &OrderRequest,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let start = std::time::Instant::now();

        // 1. Load the cart; duplicate submission is rejected here.
        let mut cart = self
            .store
            .find_cart(cart_id)
            .await?
            .ok_or(CheckoutError::CartNotFound(cart_id))?;

        if !cart.state().can_modify() {
            return Err(CartError::AlreadySubmitted.into());
        }
        tracing::debug!(stage = %CheckoutState::QuoteLoaded, "cart loaded");

        // 2. Reconcile the client's declared items. An unknown id aborts
        // with the cart untouched; nothing has been persisted yet.
        let declared: Vec<ItemId> = request
            .products
            .iter()
            .map(|product| product.server_item_id)
            .collect();
        cart.reconcile_items(&declared)?;

        if !cart.has_items() {
            return Err(CartError::NoItems.into());
        }
        tracing::debug!(
            stage = %CheckoutState::ItemsReconciled,
            items = cart.item_count(),
            "cart items reconciled"
        );

        // 3. Bind addresses and payment, then recompute shipping rates
        // against the bound shipping address before applying the method.
        let method = assembler::assemble(&mut cart, customer, &request.address_information);

        let rate = match &cart.shipping_address {
            Some(address) => self.rates.quote(address, &method).await?,
            None => None,
        };
        let rate = rate.ok_or_else(|| CheckoutError::NoShippingRate {
            method: method.clone(),
        })?;
        cart.shipping_method = Some(method);
        tracing::debug!(stage = %CheckoutState::AddressesBound, "addresses and payment bound");

        // 4. Collect totals and persist before submission is attempted.
        cart.collect_totals(rate.amount);
        self.store.save_cart(&cart).await?;
        tracing::debug!(
            stage = %CheckoutState::TotalsCollected,
            grand_total = cart.grand_total().cents(),
            "totals collected"
        );

        // 5. Submit.
        match self.submission.submit(&cart).await? {
            Some(order) => {
                // Notification delivery is fire-and-forget.
                if let Err(e) = self.notifications.queue_new_order(&order).await {
                    tracing::warn!(order_id = %order.id, error = %e, "failed to queue new order notification");
                }

                self.listing.record(&order).await?;
                self.store.insert_order(&order).await?;

                cart.mark_submitted()?;
                self.store.save_cart(&cart).await?;

                metrics::counter!("orders_placed_total").increment(1);
                metrics::histogram!("checkout_duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                tracing::info!(order_id = %order.id, "order placed");

                Ok(CheckoutOutcome::placed(order))
            }
            None => {
                metrics::counter!("checkout_submit_failed_total").increment(1);
                metrics::histogram!("checkout_duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                tracing::warn!(%cart_id, "submission yielded no order");

                Ok(CheckoutOutcome::submit_failed())
            }
        }
    }
}
