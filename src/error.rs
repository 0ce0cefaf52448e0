//! Unified error types for the Storefront gateway.
//!
//! Defines [`GatewayError`] using `thiserror` for `Display` and `Error`
//! derives. The `IntoResponse` impl is what renders the gateway's
//! "propagate" failure policy: handlers that do no local error handling
//! bubble a `GatewayError` up with `?` and the framework turns it into
//! an unstructured 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The sidecar answered with a non-2xx status. Treated as a failure
    /// so every route's error policy sees transport errors and upstream
    /// error statuses uniformly.
    #[error("Request failed with status code {0}")]
    UpstreamStatus(hyper::StatusCode),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
