//! Canonical field keys for structured log records
//!
//! These constants keep record layout consistent across adapters.

// Record envelope
pub const FIELD_TIME: &str = "time";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_MSG: &str = "msg";

// Correlation
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Bridged records carry their structured pairs under one key
pub const FIELD_FIELDS: &str = "fields";
