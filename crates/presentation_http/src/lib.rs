//! Careline HTTP presentation layer
//!
//! This crate provides the webhook and admin HTTP API for Careline.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::AdminKeyLayer;
pub use routes::create_router;
pub use state::{AppState, StatsCollector};
