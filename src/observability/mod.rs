//! Observability
//!
//! Structured logging for the service and server bootstrap.

pub mod logger;

pub use logger::{Logger, Severity};
