//! Route handlers and shared application state.

pub mod addresses;
pub mod health;
pub mod metrics;
pub mod orders;

use std::sync::Arc;

use axum::http::HeaderMap;
use checkout::{
    CheckoutCoordinator, InMemoryNotificationService, InMemoryOrderSubmissionService,
    InMemoryShippingRateService,
};
use common::CustomerId;
use domain::{AddressNormalizer, Customer, RuleValidator, StaticRegionDirectory};
use projections::OrderListingView;
use store::{AddressRepository, CartRepository, CustomerRepository, OrderRepository};

use crate::error::ApiError;

/// Bound alias for a storage backend usable by every handler.
pub trait BackingStore:
    CustomerRepository + AddressRepository + CartRepository + OrderRepository + Clone + Send + Sync + 'static
{
}

impl<T> BackingStore for T where
    T: CustomerRepository
        + AddressRepository
        + CartRepository
        + OrderRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared application state accessible from all handlers.
pub struct AppState<S: BackingStore> {
    pub store: S,
    pub normalizer: AddressNormalizer<StaticRegionDirectory, RuleValidator>,
    pub coordinator: CheckoutCoordinator<
        S,
        InMemoryShippingRateService,
        InMemoryOrderSubmissionService,
        InMemoryNotificationService,
    >,
    pub order_listing: Arc<OrderListingView>,
}

/// Header carrying the authenticated customer id, set by the session layer
/// in front of this service.
pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";

/// Resolves the authenticated customer, if the request carries one.
///
/// A missing header means an anonymous request; a malformed or unknown id is
/// an error.
pub(crate) async fn optional_customer<S: BackingStore>(
    store: &S,
    headers: &HeaderMap,
) -> Result<Option<Customer>, ApiError> {
    let Some(value) = headers.get(CUSTOMER_ID_HEADER) else {
        return Ok(None);
    };

    let raw = value
        .to_str()
        .map_err(|_| ApiError::BadRequest("Invalid customer id header".to_string()))?;
    let uuid = uuid::Uuid::parse_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid customer id: {e}")))?;

    let customer = store
        .find_customer(CustomerId::from_uuid(uuid))
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Customer not found".to_string()))?;

    Ok(Some(customer))
}

/// Resolves the authenticated customer or rejects the request.
pub(crate) async fn current_customer<S: BackingStore>(
    store: &S,
    headers: &HeaderMap,
) -> Result<Customer, ApiError> {
    optional_customer(store, headers)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Customer not found".to_string()))
}
