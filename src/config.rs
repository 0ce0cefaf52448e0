//! Gateway configuration.
//!
//! [`GatewayConfig`] is built once at startup from CLI arguments (with
//! env-var fallbacks handled by clap) and shared through
//! [`AppState`](crate::server::AppState). Handlers derive every sidecar
//! URL from it instead of reading the environment at request time.

use crate::cli::RunArgs;

/// Where the local Dapr sidecar lives and which logical service handles
/// order traffic.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP port of the co-located sidecar.
    pub dapr_port: u16,
    /// Logical app-id the sidecar resolves to the order backend.
    pub order_app_id: String,
}

impl GatewayConfig {
    #[must_use]
    pub fn from_args(args: &RunArgs) -> Self {
        Self {
            dapr_port: args.dapr_port,
            order_app_id: args.order_service.clone(),
        }
    }

    /// Base URL for service-invocation calls (order routes).
    #[must_use]
    pub fn sidecar_base(&self) -> String {
        format!("http://localhost:{}", self.dapr_port)
    }

    /// Base URL of the `statestore` key-value endpoint (pricing routes).
    #[must_use]
    pub fn state_store_url(&self) -> String {
        format!("http://localhost:{}/v1.0/state/statestore", self.dapr_port)
    }
}
