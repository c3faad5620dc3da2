//! Core types shared across ctxkit facilities
//!
//! This crate provides the foundational types used by the logging facade:
//!
//! - **Operation context**: `Context`, an immutable chain of typed bindings
//!   keyed by private `ContextKey` markers
//! - **Correlation types**: RequestId, TraceId
//! - **Schema constants**: Canonical field keys for structured records

pub mod context;
pub mod correlation;
pub mod schema;

pub use context::{Context, ContextKey};
pub use correlation::{RequestId, TraceId};
