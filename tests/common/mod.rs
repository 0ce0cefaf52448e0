//! Shared helpers for integration tests: a recording stub sidecar and a
//! gateway instance wired to it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use storefront::config::GatewayConfig;
use storefront::server::{self, AppState, Stats};

/// One request as seen by the stub sidecar.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path_and_query: String,
    pub app_id: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub type RequestLog = Arc<Mutex<Vec<Recorded>>>;

/// Start a stub sidecar that records every request and answers canned
/// JSON. Any request whose URL or body contains `fail` is answered
/// with a 500.
pub async fn start_stub_sidecar() -> (u16, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new()
        .fallback(stub_handler)
        .with_state(Arc::clone(&log));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (port, log)
}

async fn stub_handler(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    let app_id = headers
        .get("dapr-app-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    log.lock().await.push(Recorded {
        method: method.to_string(),
        path_and_query: path_and_query.clone(),
        app_id,
        body: body.clone(),
    });

    if path_and_query.contains("fail") || body.windows(4).any(|w| w == b"fail") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response();
    }

    let payload: Value = if method == Method::POST && uri.path() == "/order" {
        // Echo the created order back, like the real backend does
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    } else if uri.path().starts_with("/orders") {
        json!([{ "id": "12345", "item": "widget" }])
    } else {
        json!({ "ok": true })
    };

    Json(payload).into_response()
}

/// Start a gateway pointed at the given sidecar port; returns its address.
pub async fn start_gateway(dapr_port: u16) -> SocketAddr {
    let state = Arc::new(AppState {
        config: GatewayConfig {
            dapr_port,
            order_app_id: "python-app".into(),
        },
        http_client: server::build_http_client(),
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    let router = server::build_router(state, 1_048_576);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}
