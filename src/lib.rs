//! lexidb - A content-addressed string analysis and query service
//!
//! Strings are analyzed into a canonical set of derived properties, stored
//! under the SHA-256 digest of their content, and queried through structured
//! filters or a heuristic natural-language translator.

pub mod analyzer;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod repository;
pub mod service;
