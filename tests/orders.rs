//! Integration tests for the order route group: forwarding semantics,
//! payload enrichment, local validation, and the per-route failure
//! policies.

mod common;

use common::{start_gateway, start_stub_sidecar};
use serde_json::{json, Value};

#[tokio::test]
async fn get_order_forwards_id_and_app_id() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders?id=42"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let log = log.lock().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, "GET");
    assert_eq!(log[0].path_and_query, "/order?id=42");
    assert_eq!(log[0].app_id.as_deref(), Some("python-app"));
}

#[tokio::test]
async fn get_order_failure_propagates_as_plain_500() {
    let (sidecar_port, _log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders?id=fail"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    // Propagate mode: framework-rendered error text, not an HTML fragment
    let body = resp.text().await.unwrap();
    assert!(!body.contains("<p>"));
    assert!(body.contains("Request failed with status code"));
}

#[tokio::test]
async fn create_order_enriches_payload_and_reports_html() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/orders?id=7"))
        .json(&json!({ "item": "widget", "location": "Portland", "priority": "Rush" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert!(body.starts_with("<p>Order created!</p>"));
    assert!(body.contains("Seattle"));

    let log = log.lock().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, "POST");
    assert_eq!(log[0].path_and_query, "/order?id=7");
    assert_eq!(log[0].app_id.as_deref(), Some("python-app"));

    // Caller-supplied location/priority are overwritten, not merged
    let forwarded = log[0].body_json();
    assert_eq!(
        forwarded,
        json!({ "item": "widget", "location": "Seattle", "priority": "Standard" })
    );
}

#[tokio::test]
async fn create_order_failure_still_answers_200() {
    let (sidecar_port, _log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/orders?id=fail"))
        .json(&json!({ "item": "widget" }))
        .send()
        .await
        .unwrap();

    // Swallow-as-success: the error is reported inside a 200 HTML fragment
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Error creating order"));
    assert!(body.contains("<code>"));
}

#[tokio::test]
async fn delete_order_issues_delete_with_body_id() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/orders/delete"))
        .json(&json!({ "id": "9" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let log = log.lock().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, "DELETE");
    assert_eq!(log[0].path_and_query, "/order?id=9");
    assert_eq!(log[0].app_id.as_deref(), Some("python-app"));
}

#[tokio::test]
async fn list_orders_applies_defaults() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders/all"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body.is_array());

    let log = log.lock().await;
    assert_eq!(
        log[0].path_and_query,
        "/orders?page=1&per_page=10&sort_by=id&sort_order=asc"
    );
}

#[tokio::test]
async fn list_orders_forwards_arbitrary_sort_values() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!(
        "http://{addr}/orders/all?page=0&per_page=9999&sort_by=not_a_column&sort_order=sideways"
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), 200);

    // No local validation of paging or sort values
    let log = log.lock().await;
    assert_eq!(
        log[0].path_and_query,
        "/orders?page=0&per_page=9999&sort_by=not_a_column&sort_order=sideways"
    );
}

#[tokio::test]
async fn list_orders_failure_surfaces_500_html() {
    let (sidecar_port, _log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders/all?sort_by=fail"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Error fetching orders"));
    assert!(body.contains("Order microservice or dapr may not be running."));
}

#[tokio::test]
async fn filter_orders_forwards_date_range() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!(
        "http://{addr}/orders/filter?start_date=2022-01-01&end_date=2022-12-31"
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body.is_array());

    let log = log.lock().await;
    assert_eq!(
        log[0].path_and_query,
        "/orders/filter?start_date=2022-01-01&end_date=2022-12-31"
    );
}

#[tokio::test]
async fn filter_orders_rejects_empty_range_before_forwarding() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders/filter?start_date=&end_date="))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "Invalid date range");

    let resp = reqwest::get(format!(
        "http://{addr}/orders/filter?start_date=2022-01-01"
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), 400);

    // Validation happens before any outbound call
    assert!(log.lock().await.is_empty());
}

#[tokio::test]
async fn search_orders_forwards_order_id() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders/search?order_id=12345"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body.is_array());

    let log = log.lock().await;
    assert_eq!(log[0].path_and_query, "/orders/search?order_id=12345");
    assert_eq!(log[0].app_id.as_deref(), Some("python-app"));
}

#[tokio::test]
async fn search_orders_rejects_missing_id_before_forwarding() {
    let (sidecar_port, log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders/search?order_id="))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "Invalid order ID");

    let resp = reqwest::get(format!("http://{addr}/orders/search"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    assert!(log.lock().await.is_empty());
}

#[tokio::test]
async fn search_orders_failure_surfaces_500_html() {
    let (sidecar_port, _log) = start_stub_sidecar().await;
    let addr = start_gateway(sidecar_port).await;

    let resp = reqwest::get(format!("http://{addr}/orders/search?order_id=failing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Error searching orders"));
}
