//! HTTP API server with observability for the checkout bridge.
//!
//! Provides REST endpoints for the customer address book and order creation,
//! with structured logging (tracing) and Prometheus metrics. The handlers
//! are thin transport glue; all invariants live in the domain and checkout
//! crates.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::{AppState, BackingStore};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: BackingStore>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/addresses", get(routes::addresses::list::<S>))
        .route("/addresses", post(routes::addresses::save::<S>))
        .route("/addresses/delete", post(routes::addresses::delete::<S>))
        .route("/addresses/{id}", get(routes::addresses::get::<S>))
        .route("/orders", post(routes::orders::create::<S>))
        .route("/orders", get(routes::orders::list::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state wired against the given store and
/// the in-memory checkout services.
pub fn create_default_state<S: BackingStore>(
    store: S,
    config: &config::Config,
) -> Arc<AppState<S>> {
    use checkout::{
        CheckoutCoordinator, InMemoryNotificationService, InMemoryOrderSubmissionService,
        InMemoryShippingRateService,
    };
    use common::RegionId;
    use domain::{AddressNormalizer, Money, Region, RuleValidator, StaticRegionDirectory};
    use projections::OrderListingView;

    let regions = StaticRegionDirectory::with_regions([
        Region {
            id: RegionId::new(12),
            code: "CA".to_string(),
            name: "California".to_string(),
            country_id: "US".to_string(),
        },
        Region {
            id: RegionId::new(43),
            code: "NY".to_string(),
            name: "New York".to_string(),
            country_id: "US".to_string(),
        },
        Region {
            id: RegionId::new(57),
            code: "TX".to_string(),
            name: "Texas".to_string(),
            country_id: "US".to_string(),
        },
    ]);
    let normalizer = AddressNormalizer::new(
        regions,
        RuleValidator::new(),
        config.default_country.clone(),
    );

    let rates = InMemoryShippingRateService::with_rates([(
        "flatrate_flatrate".to_string(),
        Money::from_cents(495),
    )]);
    let submission = InMemoryOrderSubmissionService::new();
    let notifications = InMemoryNotificationService::new();
    let order_listing = Arc::new(OrderListingView::new());

    let coordinator = CheckoutCoordinator::new(
        store.clone(),
        rates,
        submission,
        notifications,
        order_listing.clone(),
    );

    Arc::new(AppState {
        store,
        normalizer,
        coordinator,
        order_listing,
    })
}
