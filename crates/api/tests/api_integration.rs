//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use checkout::{
    CheckoutCoordinator, InMemoryNotificationService, InMemoryOrderSubmissionService,
    InMemoryShippingRateService,
};
use common::RegionId;
use domain::{
    AddressNormalizer, Cart, CartItem, Customer, Money, Region, RuleValidator,
    StaticRegionDirectory,
};
use metrics_exporter_prometheus::PrometheusHandle;
use projections::OrderListingView;
use store::{CartRepository, CustomerRepository, InMemoryStore};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

struct TestEnv {
    app: axum::Router,
    store: InMemoryStore,
    submission: InMemoryOrderSubmissionService,
    notifications: InMemoryNotificationService,
}

fn setup() -> TestEnv {
    let store = InMemoryStore::new();

    let regions = StaticRegionDirectory::with_regions([Region {
        id: RegionId::new(57),
        code: "TX".to_string(),
        name: "Texas".to_string(),
        country_id: "US".to_string(),
    }]);
    let normalizer = AddressNormalizer::new(regions, RuleValidator::new(), "US");

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
        submission.clone(),
        notifications.clone(),
        order_listing.clone(),
    );

    let state = Arc::new(api::routes::AppState {
        store: store.clone(),
        normalizer,
        coordinator,
        order_listing,
    });

    let app = api::create_app(state, get_metrics_handle());

    TestEnv {
        app,
        store,
        submission,
        notifications,
    }
}

async fn seed_customer(store: &InMemoryStore) -> Customer {
    let customer = Customer::new("jane@example.com", "Jane", "Doe");
    store.save_customer(&customer).await.unwrap();
    customer
}

fn json_request(method: &str, uri: &str, customer: Option<&Customer>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(customer) = customer {
        builder = builder.header("x-customer-id", customer.id.to_string());
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, customer: Option<&Customer>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(customer) = customer {
        builder = builder.header("x-customer-id", customer.id.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn address_body(region: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "address": {
            "firstname": "Jane",
            "lastname": "Doe",
            "street": ["123 Main St", "Apt 4"],
            "city": "Austin",
            "postcode": "73301",
            "country_id": "US",
            "telephone": "555-0100",
            "region": region
        }
    })
}

#[tokio::test]
async fn test_health_check() {
    let env = setup();

    let response = env
        .app
        .oneshot(get_request("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_addresses_require_authentication() {
    let env = setup();

    let response = env
        .app
        .oneshot(get_request("/addresses", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_address_with_resolved_region() {
    let env = setup();
    let customer = seed_customer(&env.store).await;

    let response = env
        .app
        .oneshot(json_request(
            "POST",
            "/addresses",
            Some(&customer),
            address_body(serde_json::json!({ "region": "typed by hand", "region_id": 57 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["id"].as_str().is_some());
    // The canonical name wins over the client text.
    assert_eq!(json["region"]["region"], "Texas");
    assert_eq!(json["region"]["region_id"], 57);
    assert_eq!(json["street"], serde_json::json!(["123 Main St", "Apt 4"]));
    assert_eq!(json["default_billing"], false);
}

#[tokio::test]
async fn test_create_address_with_freeform_region() {
    let env = setup();
    let customer = seed_customer(&env.store).await;

    let response = env
        .app
        .oneshot(json_request(
            "POST",
            "/addresses",
            Some(&customer),
            address_body(serde_json::json!({ "region": "Texas", "region_id": null })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["region"]["region"], "Texas");
    assert_eq!(json["region"]["region_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_address_with_unknown_region_fails() {
    let env = setup();
    let customer = seed_customer(&env.store).await;

    let response = env
        .app
        .oneshot(json_request(
            "POST",
            "/addresses",
            Some(&customer),
            address_body(serde_json::json!({ "region": null, "region_id": 999 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("unknown region"));
}

#[tokio::test]
async fn test_address_validation_failure_lists_rules() {
    let env = setup();
    let customer = seed_customer(&env.store).await;

    let mut body = address_body(serde_json::json!({ "region": "Texas", "region_id": null }));
    body["address"]["city"] = serde_json::json!("");
    body["address"]["telephone"] = serde_json::json!("");

    let response = env
        .app
        .oneshot(json_request("POST", "/addresses", Some(&customer), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("city"));
    assert!(message.contains("telephone"));
}

#[tokio::test]
async fn test_default_billing_roundtrip_moves_pointer() {
    let env = setup();
    let customer = seed_customer(&env.store).await;

    // Create as default billing.
    let mut body = address_body(serde_json::json!({ "region": "Texas", "region_id": null }));
    body["address"]["default_billing"] = serde_json::json!(true);

    let response = env
        .app
        .clone()
        .oneshot(json_request("POST", "/addresses", Some(&customer), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["default_billing"], true);
    let address_id = created["id"].as_str().unwrap().to_string();

    let stored = env.store.find_customer(customer.id).await.unwrap().unwrap();
    assert_eq!(
        stored.default_billing.map(|id| id.to_string()),
        Some(address_id.clone())
    );

    // Update without the flag: pointer is cleared.
    let mut body = address_body(serde_json::json!({ "region": "Texas", "region_id": null }));
    body["address"]["id"] = serde_json::json!(address_id);

    let response = env
        .app
        .clone()
        .oneshot(json_request("POST", "/addresses", Some(&customer), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = env.store.find_customer(customer.id).await.unwrap().unwrap();
    assert_eq!(stored.default_billing, None);
}

#[tokio::test]
async fn test_get_address_ownership_and_absence() {
    let env = setup();
    let customer = seed_customer(&env.store).await;
    let stranger = seed_customer(&env.store).await;

    let response = env
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/addresses",
            Some(&customer),
            address_body(serde_json::json!({ "region": "Texas", "region_id": null })),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let address_id = created["id"].as_str().unwrap().to_string();

    // Owner fetches fine.
    let response = env
        .app
        .clone()
        .oneshot(get_request(&format!("/addresses/{address_id}"), Some(&customer)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Another customer gets 403.
    let response = env
        .app
        .clone()
        .oneshot(get_request(&format!("/addresses/{address_id}"), Some(&stranger)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Unknown id gets 404.
    let response = env
        .app
        .oneshot(get_request(
            &format!("/addresses/{}", uuid::Uuid::new_v4()),
            Some(&customer),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_address() {
    let env = setup();
    let customer = seed_customer(&env.store).await;

    let response = env
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/addresses",
            Some(&customer),
            address_body(serde_json::json!({ "region": "Texas", "region_id": null })),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let address_id = created["id"].as_str().unwrap().to_string();

    let response = env
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/addresses/delete",
            Some(&customer),
            serde_json::json!({ "address": { "id": address_id } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = env
        .app
        .oneshot(get_request("/addresses", Some(&customer)))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

async fn seed_cart(store: &InMemoryStore, item_count: usize) -> (Cart, Vec<String>) {
    let mut cart = Cart::new();
    let ids = (0..item_count)
        .map(|i| {
            cart.add_item(CartItem::new(
                format!("SKU-{i:03}"),
                format!("Product {i}"),
                1,
                Money::from_cents(1000),
            ))
            .unwrap()
            .to_string()
        })
        .collect();
    store.save_cart(&cart).await.unwrap();
    (cart, ids)
}

fn order_body(cart: &Cart, item_ids: &[String]) -> serde_json::Value {
    serde_json::json!({
        "cart_id": cart.id().to_string(),
        "products": item_ids
            .iter()
            .map(|id| serde_json::json!({ "server_item_id": id }))
            .collect::<Vec<_>>(),
        "addressInformation": {
            "billingAddress": {
                "firstname": "Jane",
                "lastname": "Doe",
                "street": ["1 Elm St", ""],
                "email": "jane@example.com"
            },
            "shippingAddress": {
                "firstname": "Jane",
                "lastname": "Doe",
                "company": "NA",
                "street": ["1 Elm St", ""]
            },
            "shipping_method_code": "flatrate",
            "shipping_carrier_code": "flatrate",
            "payment_method_code": "checkmo",
            "payment_method_additional": {}
        }
    })
}

#[tokio::test]
async fn test_create_order_with_declared_subset() {
    let env = setup();
    let (cart, ids) = seed_cart(&env.store, 3).await;

    // Declare items 1 and 3 only.
    let declared = vec![ids[0].clone(), ids[2].clone()];
    let response = env
        .app
        .oneshot(json_request("POST", "/orders", None, order_body(&cart, &declared)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "placed");
    assert!(json["order_id"].as_str().is_some());

    // Server cart shrank to the declared subset, in original order.
    let stored = env.store.find_cart(cart.id()).await.unwrap().unwrap();
    let remaining: Vec<String> = stored.items().iter().map(|i| i.id.to_string()).collect();
    assert_eq!(remaining, declared);
    // Shipping method is the carrier_method composite.
    assert_eq!(stored.shipping_method.as_deref(), Some("flatrate_flatrate"));
    // "NA" company reads as absent on the bound shipping address.
    assert_eq!(stored.shipping_address.as_ref().unwrap().company, None);

    assert_eq!(env.submission.submission_count(), 1);
    assert_eq!(env.notifications.queued_count(), 1);
}

#[tokio::test]
async fn test_create_order_with_unknown_item_fails() {
    let env = setup();
    let (cart, mut ids) = seed_cart(&env.store, 2).await;
    ids.push(uuid::Uuid::new_v4().to_string());

    let response = env
        .app
        .oneshot(json_request("POST", "/orders", None, order_body(&cart, &ids)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("item not found"));

    // Cart untouched.
    let stored = env.store.find_cart(cart.id()).await.unwrap().unwrap();
    assert_eq!(stored.item_count(), 2);
    assert_eq!(env.submission.submission_count(), 0);
}

#[tokio::test]
async fn test_create_order_submit_failure_is_reported_not_error() {
    let env = setup();
    let (cart, ids) = seed_cart(&env.store, 1).await;
    env.submission.set_yield_no_order(true);

    let response = env
        .app
        .oneshot(json_request("POST", "/orders", None, order_body(&cart, &ids)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "submit_failed");
    assert_eq!(json["order_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_order_twice_conflicts() {
    let env = setup();
    let (cart, ids) = seed_cart(&env.store, 1).await;

    let response = env
        .app
        .clone()
        .oneshot(json_request("POST", "/orders", None, order_body(&cart, &ids)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = env
        .app
        .oneshot(json_request("POST", "/orders", None, order_body(&cart, &ids)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_order_unknown_cart() {
    let env = setup();
    let (cart, ids) = seed_cart(&env.store, 1).await;

    let mut body = order_body(&cart, &ids);
    body["cart_id"] = serde_json::json!(uuid::Uuid::new_v4().to_string());

    let response = env
        .app
        .oneshot(json_request("POST", "/orders", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_listing_reflects_placed_orders() {
    let env = setup();
    let (cart, ids) = seed_cart(&env.store, 2).await;

    env.app
        .clone()
        .oneshot(json_request("POST", "/orders", None, order_body(&cart, &ids)))
        .await
        .unwrap();

    let response = env
        .app
        .oneshot(get_request("/orders", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["customer_name"], "Jane Doe");
    assert_eq!(rows[0]["email"], "jane@example.com");
    assert_eq!(rows[0]["item_count"], 2);
    // 2 x $10 + $4.95 shipping
    assert_eq!(rows[0]["grand_total_cents"], 2495);
}

#[tokio::test]
async fn test_registered_order_attaches_customer() {
    let env = setup();
    let customer = seed_customer(&env.store).await;
    let (cart, ids) = seed_cart(&env.store, 1).await;

    let response = env
        .app
        .oneshot(json_request(
            "POST",
            "/orders",
            Some(&customer),
            order_body(&cart, &ids),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored = env.store.find_cart(cart.id()).await.unwrap().unwrap();
    assert!(!stored.is_guest());
    assert_eq!(stored.customer_id(), Some(customer.id));
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let env = setup();

    let response = env
        .app
        .oneshot(get_request("/metrics", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
