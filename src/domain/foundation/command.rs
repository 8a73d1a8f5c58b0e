//! Command infrastructure for the application handlers.
//!
//! `CommandMetadata` carries the correlation context of one request through
//! a handler so that log lines emitted along the way can be tied together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Links related operations across a single request.
    correlation_id: String,

    /// Source of this command (e.g., "api", "scheduler", "sweeper").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata with a freshly generated correlation ID.
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
            source: None,
        }
    }

    /// Builder: Use an existing correlation ID (e.g. from a request header).
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Returns the source, or `"unknown"` when unset.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }
}

impl Default for CommandMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_distinct_correlation_ids() {
        let a = CommandMetadata::new();
        let b = CommandMetadata::new();
        assert_ne!(a.correlation_id(), b.correlation_id());
        assert!(Uuid::parse_str(a.correlation_id()).is_ok());
    }

    #[test]
    fn builder_overrides_correlation_id_and_source() {
        let metadata = CommandMetadata::new()
            .with_correlation_id("req-42")
            .with_source("api");
        assert_eq!(metadata.correlation_id(), "req-42");
        assert_eq!(metadata.source(), "api");
    }

    #[test]
    fn source_defaults_to_unknown() {
        assert_eq!(CommandMetadata::new().source(), "unknown");
    }

    #[test]
    fn serialization_skips_missing_source() {
        let metadata = CommandMetadata::new().with_correlation_id("abc");
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"correlation_id":"abc"}"#);
    }
}
