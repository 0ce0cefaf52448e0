//! Pricing route group: reads and writes a single key-value pricing
//! record through the sidecar's state-store endpoint.
//!
//! State-store calls carry no `dapr-app-id` header — the sidecar serves
//! them directly. Unlike the order group, failures here surface as 500
//! with the raw error message as plain text, and nothing is added to or
//! overwritten in the payload.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::Method;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::proxy::sidecar::{self, FailureMode, SidecarCall};
use crate::server::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/pricing", get(get_pricing).post(put_pricing))
}

#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    pub key: Option<String>,
}

/// A single key-value pricing record, forwarded verbatim.
#[derive(Debug, Serialize, Deserialize)]
pub struct PricingRecord {
    pub key: String,
    pub value: Value,
}

/// `GET /pricing?key=` — fetch one pricing record from the state store.
pub async fn get_pricing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PricingQuery>,
) -> Result<Response, GatewayError> {
    let url = format!(
        "{}/{}",
        state.config.state_store_url(),
        query.key.unwrap_or_default()
    );

    let call = SidecarCall {
        method: Method::GET,
        url,
        app_id: None,
        body: None,
    };
    match sidecar::invoke(&state, call).await {
        Ok(body) => Ok(sidecar::json_passthrough(body)),
        Err(err) => sidecar::failure_response(FailureMode::SurfaceText, "fetching pricing", err),
    }
}

/// `POST /pricing` — create or update one pricing record.
///
/// The record is wrapped in a single-element array on the wire, the
/// state store's bulk-upsert convention.
pub async fn put_pricing(
    State(state): State<Arc<AppState>>,
    Json(record): Json<PricingRecord>,
) -> Result<Response, GatewayError> {
    let url = state.config.state_store_url();

    let result = async {
        let payload = serde_json::to_vec(&[&record]).map_err(|e| GatewayError::HttpRequest {
            source: Box::new(e),
        })?;
        let call = SidecarCall {
            method: Method::POST,
            url,
            app_id: None,
            body: Some(payload.into()),
        };
        sidecar::invoke(&state, call).await
    }
    .await;

    match result {
        Ok(body) => Ok(sidecar::json_passthrough(body)),
        Err(err) => sidecar::failure_response(FailureMode::SurfaceText, "updating pricing", err),
    }
}
