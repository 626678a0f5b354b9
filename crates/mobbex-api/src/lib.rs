//! Mobbex gateway bridge HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod routes;
pub mod server;

pub use config::Config;
pub use routes::RouteTable;
pub use server::{create_router, start_server, AppState};
