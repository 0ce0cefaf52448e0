//! The order and pricing route groups and the shared sidecar call engine.
//!
//! Each route group ([`orders`], [`pricing`]) owns its inbound paths and
//! forwards exactly one outbound call per request through [`sidecar`].
//! The groups share no state beyond [`AppState`](crate::server::AppState)
//! and differ deliberately in how they render outbound failures — see
//! [`sidecar::FailureMode`] for the per-route policy table.

pub mod orders;
pub mod pricing;
pub mod sidecar;
