//! Order listing read model — flattened rows for order display and search.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use domain::{Money, Order};
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::OrderListing;
use crate::read_model::ReadModel;

/// One denormalized listing row per placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderListingRow {
    pub order_id: OrderId,
    pub customer_id: Option<CustomerId>,
    /// "firstname lastname" from the cart-level denormalized fields.
    pub customer_name: String,
    pub email: Option<String>,
    pub item_count: usize,
    pub total_quantity: u32,
    pub shipping_method: Option<String>,
    pub payment_method: Option<String>,
    pub grand_total: Money,
    pub placed_at: DateTime<Utc>,
}

impl OrderListingRow {
    fn from_order(order: &Order) -> Self {
        let customer_name = [order.firstname.as_deref(), order.lastname.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            order_id: order.id,
            customer_id: order.customer_id,
            customer_name,
            email: order.email.clone(),
            item_count: order.item_count(),
            total_quantity: order.total_quantity(),
            shipping_method: order.shipping_method.clone(),
            payment_method: order.payment_method.clone(),
            grand_total: order.grand_total,
            placed_at: order.placed_at,
        }
    }
}

/// In-memory order listing view.
///
/// Written once per placed order at submission time; queries never touch the
/// order aggregates.
#[derive(Clone, Default)]
pub struct OrderListingView {
    rows: Arc<RwLock<Vec<OrderListingRow>>>,
}

impl OrderListingView {
    /// Creates a new empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a single listing row by order id.
    pub async fn get(&self, order_id: OrderId) -> Option<OrderListingRow> {
        self.rows
            .read()
            .await
            .iter()
            .find(|row| row.order_id == order_id)
            .cloned()
    }

    /// Gets all listing rows, most recent first.
    pub async fn get_all(&self) -> Vec<OrderListingRow> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        rows
    }

    /// Gets a customer's listing rows, most recent first.
    pub async fn get_for_customer(&self, customer_id: CustomerId) -> Vec<OrderListingRow> {
        let mut rows: Vec<OrderListingRow> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.customer_id == Some(customer_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        rows
    }

    /// Clears all rows.
    pub async fn reset(&self) {
        self.rows.write().await.clear();
    }
}

#[async_trait]
impl OrderListing for OrderListingView {
    async fn record(&self, order: &Order) -> Result<()> {
        let row = OrderListingRow::from_order(order);
        self.rows.write().await.push(row);
        Ok(())
    }
}

impl ReadModel for OrderListingView {
    fn name(&self) -> &'static str {
        "OrderListingView"
    }

    fn count(&self) -> usize {
        self.rows.try_read().map(|rows| rows.len()).unwrap_or(0)
    }
}
