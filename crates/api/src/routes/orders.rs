//! Order creation and listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use checkout::OrderRequest;
use serde::Serialize;

use crate::error::ApiError;

use super::{AppState, BackingStore, optional_customer};

/// Response for POST /orders.
///
/// `order_id` is absent when the submission capability yielded no order;
/// that outcome is reported explicitly rather than as an error.
#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: Option<String>,
    pub status: &'static str,
}

/// One row of the denormalized order listing.
#[derive(Serialize)]
pub struct OrderListingResponse {
    pub order_id: String,
    pub customer_name: String,
    pub email: Option<String>,
    pub item_count: usize,
    pub total_quantity: u32,
    pub shipping_method: Option<String>,
    pub payment_method: Option<String>,
    pub grand_total_cents: i64,
    pub placed_at: String,
}

/// POST /orders — reconcile the declared items and promote the cart into an
/// order.
///
/// Anonymous requests check out as guests; a customer id header attaches the
/// customer to the cart.
#[tracing::instrument(skip(state, headers, request))]
pub async fn create<S: BackingStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let customer = optional_customer(&state.store, &headers).await?;

    let outcome = state
        .coordinator
        .place_order(request.cart_id, customer.as_ref(), &request)
        .await?;

    match outcome.order {
        Some(order) => Ok((
            StatusCode::CREATED,
            Json(OrderCreatedResponse {
                order_id: Some(order.id.to_string()),
                status: "placed",
            }),
        )),
        None => Ok((
            StatusCode::OK,
            Json(OrderCreatedResponse {
                order_id: None,
                status: "submit_failed",
            }),
        )),
    }
}

/// GET /orders — list placed orders from the denormalized projection.
#[tracing::instrument(skip(state))]
pub async fn list<S: BackingStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<OrderListingResponse>>, ApiError> {
    let rows = state.order_listing.get_all().await;

    let responses = rows
        .into_iter()
        .map(|row| OrderListingResponse {
            order_id: row.order_id.to_string(),
            customer_name: row.customer_name,
            email: row.email,
            item_count: row.item_count,
            total_quantity: row.total_quantity,
            shipping_method: row.shipping_method,
            payment_method: row.payment_method,
            grand_total_cents: row.grand_total.cents(),
            placed_at: row.placed_at.to_rfc3339(),
        })
        .collect();

    Ok(Json(responses))
}
