//! Storefront is an HTTP gateway for Dapr-backed order and pricing services.
//!
//! It receives browser-originated REST requests and forwards each one to a
//! backend microservice through the local Dapr sidecar: order routes are
//! service-invocation calls carrying a `dapr-app-id` header, pricing routes
//! target the sidecar's key-value state store. The gateway relays the backend
//! response (or a canned error message) back to the caller — it never
//! interprets or stores the payloads passing through it.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- The [`GatewayConfig`](config::GatewayConfig) struct built
//!   once at startup; handlers never read the environment themselves.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- The order and pricing route groups and the shared sidecar
//!   call engine with its per-route failure policies.
//! - [`server`] -- Axum server setup, shared application state, HTTP client, and
//!   graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod proxy;
pub mod server;
