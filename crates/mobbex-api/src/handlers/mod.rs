//! HTTP request handlers.
//!
//! Two groups:
//! - `webhook` - the inbound provider notification endpoint; its contract
//!   is that every code path yields a serializable `{ "result": bool }`
//!   response, whatever fails internally.
//! - `health` - liveness and readiness probes reporting the bootstrap
//!   outcome.

pub mod health;
pub mod webhook;

pub use health::{health_check, liveness_check, readiness_check};
pub use webhook::mobbex_webhook;
