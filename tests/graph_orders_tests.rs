//! Integration tests for commerce order operations.
//!
//! These tests check the parameter rules of order listings and the envelopes
//! of the mutating lifecycle calls against a mock Graph server.

use std::collections::{BTreeMap, HashMap, HashSet};

use meta_graph_api::graph::{
    next_orders_cursor, FulfillmentAddress, RefundItem, ShipmentItem, TrackingInfo,
};
use meta_graph_api::{
    AccessToken, GraphApiAdapter, GraphApiConfig, GraphApiError, GraphBaseUrl, OrderFilter,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

async fn setup() -> (MockServer, GraphApiAdapter) {
    let server = MockServer::start().await;
    let config = GraphApiConfig::builder()
        .graph_base_url(GraphBaseUrl::new(server.uri()).unwrap())
        .access_token(AccessToken::new("orders-token").unwrap())
        .build()
        .unwrap();
    let adapter = GraphApiAdapter::new(&config).unwrap();
    (server, adapter)
}

async fn mount_ok(server: &MockServer, verb: &str, endpoint: &str) {
    Mock::given(method(verb))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(server)
        .await;
}

fn form_params(request: &Request) -> HashMap<String, String> {
    let body = String::from_utf8_lossy(&request.body);
    reqwest::Url::parse(&format!("http://localhost/?{body}"))
        .unwrap()
        .query_pairs()
        .into_owned()
        .collect()
}

fn query_params(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

fn json_param(params: &HashMap<String, String>, key: &str) -> Value {
    serde_json::from_str(&params[key]).unwrap()
}

// ============================================================================
// Order Listings
// ============================================================================

#[tokio::test]
async fn test_get_orders_refund_filter_and_cursor() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "GET", "/v15.0/page-1/commerce_orders").await;

    let now = chrono::Utc::now().timestamp();
    adapter
        .get_orders("page-1", Some("cursor-xyz"), OrderFilter::Refunds)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = query_params(&requests[0]);
    assert_eq!(query["state"], "CREATED,IN_PROGRESS,COMPLETED");
    assert_eq!(query["filters"], "has_refunds");
    assert_eq!(query["after"], "cursor-xyz");
    assert_eq!(query["limit"], "25");
    assert_eq!(query["access_token"], "orders-token");

    let updated_after: i64 = query["updated_after"].parse().unwrap();
    let expected = now - 180 * SECONDS_PER_DAY;
    assert!((updated_after - expected).abs() <= 5);
}

#[tokio::test]
async fn test_get_orders_cancellation_filter() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "GET", "/v15.0/page-1/commerce_orders").await;

    adapter
        .get_orders("page-1", None, OrderFilter::Cancellations)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = query_params(&requests[0]);
    assert_eq!(query["state"], "CREATED,IN_PROGRESS,COMPLETED");
    assert_eq!(query["filters"], "has_cancellations");
    assert!(!query.contains_key("after"));
}

#[tokio::test]
async fn test_get_orders_without_filter() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "GET", "/v15.0/page-1/commerce_orders").await;

    adapter
        .get_orders("page-1", None, OrderFilter::None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = query_params(&requests[0]);
    assert!(!query.contains_key("state"));
    assert!(!query.contains_key("filters"));
    assert!(!query.contains_key("after"));
    assert!(query["fields"].contains("promotion_details{applied_amount"));
}

#[tokio::test]
async fn test_order_listing_pagination() {
    let (server, adapter) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v15.0/page-1/commerce_orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "o-1"}],
            "paging": {"cursors": {"before": "b", "after": "next-page"}, "next": "https://graph/next"}
        })))
        .mount(&server)
        .await;

    let page = adapter
        .get_orders("page-1", None, OrderFilter::None)
        .await
        .unwrap();
    assert_eq!(next_orders_cursor(&page).as_deref(), Some("next-page"));
}

#[tokio::test]
async fn test_get_refunds_and_cancellations_return_data() {
    let (server, adapter) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v15.0/o-1/refunds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "r-1"}]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v15.0/o-1/cancellations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    assert_eq!(adapter.get_refunds("o-1").await.unwrap(), json!([{"id": "r-1"}]));
    assert_eq!(adapter.get_cancellations("o-1").await.unwrap(), json!([]));

    let requests = server.received_requests().await.unwrap();
    assert!(query_params(&requests[0])["fields"].starts_with("id,items{"));
}

#[tokio::test]
async fn test_get_order_items_fields() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "GET", "/v15.0/o-1/items").await;

    adapter.get_order_items("o-1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        query_params(&requests[0])["fields"],
        "retailer_id,quantity,price_per_unit,tax_details,product_id,promotion_details"
    );
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_mutations_carry_unique_idempotency_keys() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "POST", "/v15.0/page-1/acknowledge_orders").await;
    mount_ok(&server, "POST", "/v15.0/o-1/shipments").await;
    mount_ok(&server, "POST", "/v15.0/o-1/cancellations").await;
    mount_ok(&server, "POST", "/v15.0/o-1/refunds").await;

    let mut order_ids = BTreeMap::new();
    order_ids.insert("000000101".to_string(), "o-1".to_string());
    let tracking = TrackingInfo {
        tracking_number: "1Z999".to_string(),
        carrier: "UPS".to_string(),
        shipping_method_name: None,
    };

    adapter.acknowledge_orders("page-1", &order_ids).await.unwrap();
    adapter
        .mark_order_as_shipped("o-1", &json!([]), &tracking, None)
        .await
        .unwrap();
    adapter.cancel_order("o-1").await.unwrap();
    adapter.cancel_order("o-1").await.unwrap();
    adapter
        .refund_order("o-1", &json!([]), 1.0, 0.0, "USD", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
    let paths: Vec<&str> = requests.iter().map(|request| request.url.path()).collect();
    assert_eq!(
        paths,
        [
            "/v15.0/page-1/acknowledge_orders",
            "/v15.0/o-1/shipments",
            "/v15.0/o-1/cancellations",
            "/v15.0/o-1/cancellations",
            "/v15.0/o-1/refunds",
        ]
    );

    let keys: Vec<String> = requests
        .iter()
        .map(|request| {
            form_params(request)
                .get("idempotency_key")
                .cloned()
                .unwrap_or_default()
        })
        .collect();
    assert!(keys.iter().all(|key| !key.is_empty()));
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len());
}

#[tokio::test]
async fn test_cancel_order_params() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "POST", "/v15.0/o-1/cancellations").await;

    adapter.cancel_order("o-1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let form = form_params(&requests[0]);
    assert_eq!(form["restock_items"], "true");
    assert_eq!(
        json_param(&form, "cancel_reason"),
        json!({"reason_code": "CUSTOMER_REQUESTED", "reason_description": "Cancelled from Magento"})
    );
}

#[tokio::test]
async fn test_acknowledge_orders_params() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "POST", "/v15.0/page-1/acknowledge_orders").await;

    let mut order_ids = BTreeMap::new();
    order_ids.insert("000000101".to_string(), "fb-101".to_string());
    adapter.acknowledge_orders("page-1", &order_ids).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let form = form_params(&requests[0]);
    assert!(form.contains_key("idempotency_key"));
    assert_eq!(
        json_param(&form, "orders"),
        json!([{"id": "fb-101", "merchant_order_reference": "000000101"}])
    );
}

#[tokio::test]
async fn test_acknowledge_orders_rejects_empty_map() {
    let (server, adapter) = setup().await;

    let error = adapter
        .acknowledge_orders("page-1", &BTreeMap::new())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        GraphApiError::InvalidArgument { argument: "order_ids", .. }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_order_as_shipped_with_fulfillment_address() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "POST", "/v15.0/o-1/shipments").await;

    let items = vec![ShipmentItem {
        retailer_id: "sku-1".to_string(),
        quantity: 1,
    }];
    let tracking = TrackingInfo {
        tracking_number: "1Z999".to_string(),
        carrier: "UPS".to_string(),
        shipping_method_name: Some("Ground".to_string()),
    };
    let address = FulfillmentAddress {
        street1: "1 Warehouse Rd".to_string(),
        city: "Austin".to_string(),
        state: Some("TX".to_string()),
        postal_code: "73301".to_string(),
        country: "US".to_string(),
        ..FulfillmentAddress::default()
    };
    adapter
        .mark_order_as_shipped("o-1", &items, &tracking, Some(&address))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let form = form_params(&requests[0]);
    assert_eq!(form["should_use_default_fulfillment_location"], "false");
    assert_eq!(json_param(&form, "fulfillment")["fulfillment_address"]["state"], "TX");
    assert_eq!(json_param(&form, "tracking_info")["shipping_method_name"], "Ground");
    assert_eq!(json_param(&form, "items"), json!([{"retailer_id": "sku-1", "quantity": 1}]));
    assert!(form.contains_key("idempotency_key"));
}

#[tokio::test]
async fn test_refund_order_with_deduction() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "POST", "/v15.0/o-1/refunds").await;

    let items = vec![RefundItem {
        retailer_id: "sku-1".to_string(),
        item_refund_quantity: 1,
    }];
    adapter
        .refund_order("o-1", &items, 4.5, 2.0, "USD", Some("Damaged in transit"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let form = form_params(&requests[0]);
    assert_eq!(form["reason_code"], "REFUND_REASON_OTHER");
    assert_eq!(form["reason_text"], "Damaged in transit");
    assert_eq!(
        json_param(&form, "shipping"),
        json!({"shipping_refund": {"amount": 4.5, "currency": "USD"}})
    );
    assert_eq!(
        json_param(&form, "deductions"),
        json!([{"deduction_type": "RETURN_SHIPPING", "deduction_amount": {"amount": 2.0, "currency": "USD"}}])
    );
}

#[tokio::test]
async fn test_refund_order_without_deduction() {
    let (server, adapter) = setup().await;
    mount_ok(&server, "POST", "/v15.0/o-1/refunds").await;

    adapter
        .refund_order("o-1", &json!([]), 0.0, 0.0, "USD", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let form = form_params(&requests[0]);
    assert!(!form.contains_key("deductions"));
    assert!(!form.contains_key("reason_text"));
    assert!(!form["idempotency_key"].is_empty());
}
