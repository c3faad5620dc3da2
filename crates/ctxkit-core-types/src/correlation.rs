//! Correlation ids carried through an operation context
//!
//! These ids let records emitted deep inside a call chain be tied back to the
//! request or trace that started it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::{Context, ContextKey};

/// Unique identifier for a single request or operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. an inbound header)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trace identifier for distributed tracing across service boundaries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceId(String);

impl TraceId {
    /// Generate a new random TraceId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. a propagated trace header)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct RequestIdKey;

impl ContextKey for RequestIdKey {
    type Value = RequestId;
}

struct TraceIdKey;

impl ContextKey for TraceIdKey {
    type Value = TraceId;
}

impl Context {
    /// Derive a child context carrying `request_id`
    #[must_use]
    pub fn with_request_id(&self, request_id: RequestId) -> Self {
        self.with_value::<RequestIdKey>(request_id)
    }

    /// The nearest RequestId bound in this context
    pub fn request_id(&self) -> Option<&RequestId> {
        self.value::<RequestIdKey>()
    }

    /// Derive a child context carrying `trace_id`
    #[must_use]
    pub fn with_trace_id(&self, trace_id: TraceId) -> Self {
        self.with_value::<TraceIdKey>(trace_id)
    }

    /// The nearest TraceId bound in this context
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.value::<TraceIdKey>()
    }
}
