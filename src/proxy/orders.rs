//! Order route group: forwards order requests to the order microservice
//! via sidecar service invocation.
//!
//! Every outbound call carries the `dapr-app-id` header naming the
//! logical order service; the sidecar resolves it to a concrete backend.
//! Query values are interpolated into the sidecar URL as-is — no
//! validation of page, sort field, or sort order happens here, the
//! backend owns the schema. The only local checks are presence checks on
//! the filter and search routes, answered with a fixed 400 body before
//! any outbound call is made.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::proxy::sidecar::{self, FailureMode, SidecarCall};
use crate::server::AppState;

/// Constant fields stamped onto every created order, overwriting any
/// caller-supplied values.
const ORDER_LOCATION: &str = "Seattle";
const ORDER_PRIORITY: &str = "Standard";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", get(get_order).post(create_order))
        .route("/orders/delete", post(delete_order))
        .route("/orders/all", get(list_orders))
        .route("/orders/filter", get(filter_orders))
        .route("/orders/search", get(search_orders))
}

#[derive(Debug, Deserialize)]
pub struct OrderIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOrderBody {
    pub id: Option<String>,
}

/// `GET /orders?id=` — look up a single order.
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrderIdQuery>,
) -> Result<Response, GatewayError> {
    let url = format!(
        "{}/order?id={}",
        state.config.sidecar_base(),
        query.id.unwrap_or_default()
    );
    tracing::info!(target = %url, "service invoke: get order");

    let call = SidecarCall {
        method: Method::GET,
        url,
        app_id: Some(&state.config.order_app_id),
        body: None,
    };
    match sidecar::invoke(&state, call).await {
        Ok(body) => Ok(sidecar::json_passthrough(body)),
        Err(err) => sidecar::failure_response(FailureMode::Propagate, "fetching order", err),
    }
}

/// `POST /orders?id=` — create an order.
///
/// The caller's order object is stamped with the constant `location`
/// and `priority` fields before forwarding. Both arms answer 200: a
/// created-order HTML fragment on success, an error HTML fragment on
/// failure.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrderIdQuery>,
    Json(order): Json<Value>,
) -> Result<Response, GatewayError> {
    let order = enrich_order(order);
    let url = format!(
        "{}/order?id={}",
        state.config.sidecar_base(),
        query.id.unwrap_or_default()
    );
    tracing::info!(target = %url, "service invoke: create order");

    let result = async {
        let payload = serde_json::to_vec(&order).map_err(|e| GatewayError::HttpRequest {
            source: Box::new(e),
        })?;
        let call = SidecarCall {
            method: Method::POST,
            url,
            app_id: Some(&state.config.order_app_id),
            body: Some(payload.into()),
        };
        sidecar::invoke(&state, call).await
    }
    .await;

    match result {
        Ok(body) => Ok(Html(format!(
            "<p>Order created!</p><br/><code>{}</code>",
            String::from_utf8_lossy(&body)
        ))
        .into_response()),
        Err(err) => sidecar::failure_response(FailureMode::SwallowAsSuccess, "creating order", err),
    }
}

/// `POST /orders/delete` — delete the order named by the body's `id`.
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeleteOrderBody>,
) -> Result<Response, GatewayError> {
    let url = format!(
        "{}/order?id={}",
        state.config.sidecar_base(),
        body.id.unwrap_or_default()
    );
    tracing::info!(target = %url, "service invoke: delete order");

    let call = SidecarCall {
        method: Method::DELETE,
        url,
        app_id: Some(&state.config.order_app_id),
        body: None,
    };
    match sidecar::invoke(&state, call).await {
        Ok(body) => Ok(sidecar::json_passthrough(body)),
        Err(err) => sidecar::failure_response(FailureMode::Propagate, "deleting order", err),
    }
}

/// `GET /orders/all` — list orders with pagination and sorting.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, GatewayError> {
    let url = format!(
        "{}/orders?page={}&per_page={}&sort_by={}&sort_order={}",
        state.config.sidecar_base(),
        query.page.unwrap_or_else(|| "1".into()),
        query.per_page.unwrap_or_else(|| "10".into()),
        query.sort_by.unwrap_or_else(|| "id".into()),
        query.sort_order.unwrap_or_else(|| "asc".into()),
    );

    let call = SidecarCall {
        method: Method::GET,
        url,
        app_id: Some(&state.config.order_app_id),
        body: None,
    };
    match sidecar::invoke(&state, call).await {
        Ok(body) => Ok(sidecar::json_passthrough(body)),
        Err(err) => sidecar::failure_response(FailureMode::SurfaceHtml, "fetching orders", err),
    }
}

/// `GET /orders/filter` — filter orders by date range. Both bounds are
/// required; a missing or empty bound is rejected locally.
pub async fn filter_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Response, GatewayError> {
    let (start_date, end_date) = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => (start, end),
        _ => return Ok((StatusCode::BAD_REQUEST, "Invalid date range").into_response()),
    };

    let url = format!(
        "{}/orders/filter?start_date={start_date}&end_date={end_date}",
        state.config.sidecar_base(),
    );

    let call = SidecarCall {
        method: Method::GET,
        url,
        app_id: Some(&state.config.order_app_id),
        body: None,
    };
    match sidecar::invoke(&state, call).await {
        Ok(body) => Ok(sidecar::json_passthrough(body)),
        Err(err) => sidecar::failure_response(FailureMode::SurfaceHtml, "filtering orders", err),
    }
}

/// `GET /orders/search` — search orders by order ID. The ID is required;
/// missing or empty is rejected locally.
pub async fn search_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, GatewayError> {
    let order_id = match query.order_id {
        Some(id) if !id.is_empty() => id,
        _ => return Ok((StatusCode::BAD_REQUEST, "Invalid order ID").into_response()),
    };

    let url = format!(
        "{}/orders/search?order_id={order_id}",
        state.config.sidecar_base(),
    );

    let call = SidecarCall {
        method: Method::GET,
        url,
        app_id: Some(&state.config.order_app_id),
        body: None,
    };
    match sidecar::invoke(&state, call).await {
        Ok(body) => Ok(sidecar::json_passthrough(body)),
        Err(err) => sidecar::failure_response(FailureMode::SurfaceHtml, "searching orders", err),
    }
}

/// Stamp the constant routing fields onto an order object, overwriting
/// caller-supplied values. Non-object payloads pass through unchanged.
fn enrich_order(mut order: Value) -> Value {
    if let Value::Object(ref mut fields) = order {
        fields.insert("location".into(), Value::String(ORDER_LOCATION.into()));
        fields.insert("priority".into(), Value::String(ORDER_PRIORITY.into()));
    }
    order
}
