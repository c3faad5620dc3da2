//! Carry a logger through an operation context
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use ctxkit_core_types::Context;
//! use ctxkit_logging::{attach_logger, logger_from_context, JsonLogger, Logger};
//!
//! let ctx = attach_logger(&Context::background(), Arc::new(JsonLogger::from_env()));
//!
//! // Anywhere further down the call chain
//! let logger = logger_from_context(&ctx);
//! logger.debugw("resolved handler", &[]);
//! ```

use std::sync::Arc;

use ctxkit_core_types::schema::{FIELD_REQUEST_ID, FIELD_TRACE_ID};
use ctxkit_core_types::{Context, ContextKey};

use crate::fallback::fallback;
use crate::logger::{Fields, Logger};
use crate::noop::noop;

struct LoggerKey;

impl ContextKey for LoggerKey {
    type Value = Arc<dyn Logger>;
}

/// Derive a child context with `logger` bound
///
/// Replaces any logger the parent carries for readers of the child only.
#[must_use]
pub fn attach_logger(ctx: &Context, logger: Arc<dyn Logger>) -> Context {
    ctx.with_value::<LoggerKey>(logger)
}

/// The logger bound in `ctx`, or the process-wide [`fallback`]
///
/// Never fails; the result can always be logged to.
pub fn logger_from_context(ctx: &Context) -> Arc<dyn Logger> {
    ctx.value::<LoggerKey>().cloned().unwrap_or_else(fallback)
}

/// The logger bound in `ctx`, else `fallback`, else the no-op logger
///
/// Lets a composition root pass its default explicitly instead of
/// installing a process-wide one.
pub fn logger_from_context_or(
    ctx: &Context,
    fallback: Option<&Arc<dyn Logger>>,
) -> Arc<dyn Logger> {
    match ctx.value::<LoggerKey>() {
        Some(logger) => Arc::clone(logger),
        None => fallback.cloned().unwrap_or_else(noop),
    }
}

/// [`logger_from_context`] enriched with the context's correlation ids
///
/// Adds `request_id` and `trace_id` fields for whichever ids `ctx` carries.
/// Without any, the retrieved logger is returned as is.
pub fn scoped_logger(ctx: &Context) -> Arc<dyn Logger> {
    let logger = logger_from_context(ctx);

    let mut fields = Fields::new();
    if let Some(request_id) = ctx.request_id() {
        fields.push(FIELD_REQUEST_ID, request_id.as_str());
    }
    if let Some(trace_id) = ctx.trace_id() {
        fields.push(FIELD_TRACE_ID, trace_id.as_str());
    }

    if fields.is_empty() {
        logger
    } else {
        logger.with(&fields)
    }
}

/// Method-style access to the facade on [`Context`]
pub trait LoggerContextExt {
    /// See [`attach_logger`]
    #[must_use]
    fn with_logger(&self, logger: Arc<dyn Logger>) -> Context;

    /// See [`logger_from_context`]
    fn logger(&self) -> Arc<dyn Logger>;
}

impl LoggerContextExt for Context {
    fn with_logger(&self, logger: Arc<dyn Logger>) -> Context {
        attach_logger(self, logger)
    }

    fn logger(&self) -> Arc<dyn Logger> {
        logger_from_context(self)
    }
}
