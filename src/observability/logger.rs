//! Structured JSON logger
//!
//! One log line = one event. Lines are emitted synchronously with no
//! buffering, and key order is deterministic (alphabetical), so identical
//! events always serialize identically. INFO and WARN go to stdout, ERROR to
//! stderr.

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous one-line JSON event logger.
pub struct Logger;

impl Logger {
    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Info, event, fields, &mut io::stdout());
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Warn, event, fields, &mut io::stdout());
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Error, event, fields, &mut io::stderr());
    }

    fn emit<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        // serde_json's default Map is a BTreeMap, which gives alphabetical
        // key ordering and therefore byte-identical lines for equal events.
        let mut entry = Map::new();
        entry.insert("event".to_string(), Value::String(event.to_string()));
        entry.insert(
            "severity".to_string(),
            Value::String(severity.as_str().to_string()),
        );
        for (key, value) in fields {
            entry.insert((*key).to_string(), Value::String((*value).to_string()));
        }

        let line = Value::Object(entry).to_string();
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

/// Render an event to a string, for tests.
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::emit(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
