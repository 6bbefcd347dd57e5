//! HTTP API
//!
//! Axum surface over the string service: routing, query-parameter parsing,
//! response envelopes and the mapping of service errors to status codes.

pub mod config;
pub mod errors;
pub mod params;
pub mod response;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
