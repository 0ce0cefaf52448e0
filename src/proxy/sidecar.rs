//! Single-target outbound calls to the local Dapr sidecar.
//!
//! [`invoke`] builds a hyper request (method, URL, optional `dapr-app-id`
//! header, optional JSON body), sends it through the shared
//! connection-pooled client, and collects the response body. A non-2xx
//! upstream status is an error, so every route's failure path sees
//! transport errors and backend error statuses uniformly.
//!
//! [`FailureMode`] is the explicit per-route failure policy table:
//! the routes render outbound failures in deliberately different ways,
//! and selecting the mode by name at each call site keeps that an
//! intentional table rather than accidental per-handler code paths.

use std::sync::atomic::Ordering;
use std::time::Instant;

use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};

use crate::error::GatewayError;
use crate::server::AppState;

/// One outbound request to the sidecar.
pub struct SidecarCall<'a> {
    pub method: Method,
    pub url: String,
    /// Logical service name for sidecar service invocation. `None` for
    /// state-store calls, which the sidecar handles itself.
    pub app_id: Option<&'a str>,
    /// JSON payload, already serialized. `None` sends an empty body.
    pub body: Option<Bytes>,
}

/// How a route renders an outbound failure.
///
/// | mode | routes | rendering |
/// |---|---|---|
/// | `Propagate` | get order, delete order | handler returns `Err`, framework renders an unstructured 500 |
/// | `SwallowAsSuccess` | create order | 200 with the error in an HTML fragment |
/// | `SurfaceHtml` | list / filter / search orders | 500 with the error in an HTML fragment |
/// | `SurfaceText` | pricing get / put | 500 with the raw error message as plain text |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Propagate,
    SwallowAsSuccess,
    SurfaceHtml,
    SurfaceText,
}

/// Send one call to the sidecar and collect the response body.
///
/// There is no deadline on the outbound await: a hung sidecar call holds
/// the inbound request open.
#[allow(clippy::cast_possible_truncation)]
pub async fn invoke(state: &AppState, call: SidecarCall<'_>) -> Result<Bytes, GatewayError> {
    let mut builder = hyper::Request::builder()
        .method(call.method.clone())
        .uri(call.url.as_str());

    if let Some(app_id) = call.app_id {
        builder = builder.header("dapr-app-id", app_id);
    }
    if call.body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }

    let req = builder
        .body(Full::new(call.body.unwrap_or_default()))
        .map_err(|e| GatewayError::HttpRequest {
            source: Box::new(e),
        })?;

    let start = Instant::now();
    let result = state.http_client.request(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                method = %call.method,
                target = %call.url,
                error = %e,
                latency_ms,
                "sidecar call failed"
            );
            return Err(GatewayError::HttpRequest {
                source: Box::new(e),
            });
        }
    };

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| GatewayError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if status.is_success() {
        state.stats.forwarded.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            method = %call.method,
            target = %call.url,
            status = status.as_u16(),
            latency_ms,
            "sidecar responded"
        );
        Ok(body)
    } else {
        state.stats.failed.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            method = %call.method,
            target = %call.url,
            status = status.as_u16(),
            latency_ms,
            "sidecar returned error status"
        );
        Err(GatewayError::UpstreamStatus(status))
    }
}

/// Relay a backend JSON body verbatim: 200 with `application/json`.
#[must_use]
pub fn json_passthrough(body: Bytes) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Render an outbound failure according to the route's [`FailureMode`].
///
/// `action` names the attempted operation for the HTML fragments
/// ("creating order", "fetching orders", ...); the plain-text mode
/// ignores it.
pub fn failure_response(
    mode: FailureMode,
    action: &str,
    err: GatewayError,
) -> Result<Response, GatewayError> {
    match mode {
        FailureMode::Propagate => Err(err),
        FailureMode::SwallowAsSuccess => {
            Ok((StatusCode::OK, Html(error_fragment(action, &err))).into_response())
        }
        FailureMode::SurfaceHtml => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(error_fragment(action, &err)),
        )
            .into_response()),
        FailureMode::SurfaceText => {
            Ok((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response())
        }
    }
}

fn error_fragment(action: &str, err: &GatewayError) -> String {
    format!(
        "<p>Error {action}<br/>Order microservice or dapr may not be running.<br/></p><br/><code>{err}</code>"
    )
}
