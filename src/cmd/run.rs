//! `storefront run` — start the gateway server.
//!
//! Builds the gateway config from CLI arguments, constructs the shared
//! application state and HTTP client, and serves the Axum router with
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::cli::RunArgs;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::logging;
use crate::server::{self, AppState, Stats};

pub async fn execute(args: RunArgs) -> Result<(), GatewayError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let config = GatewayConfig::from_args(&args);

    let state = Arc::new(AppState {
        config: config.clone(),
        http_client: server::build_http_client(),
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    let router = server::build_router(state, args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        sidecar = %config.sidecar_base(),
        order_app_id = %config.order_app_id,
        "storefront started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("storefront stopped");
    Ok(())
}
