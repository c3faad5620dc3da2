//! Context-scoped logging facade
//!
//! This crate lets a structured logger ride along an operation
//! [`Context`](ctxkit_core_types::Context) instead of being threaded through
//! every call:
//!
//! - [`Logger`]: leveled capability (5 severities x 3 call shapes, plus `with`)
//! - [`attach_logger`] / [`logger_from_context`]: bind and retrieve a logger
//! - [`NoopLogger`] and the process-wide [`fallback`]: what retrieval returns
//!   when nothing is bound, so callers never need to check
//! - [`JsonLogger`]: reference adapter writing JSON lines, threshold from
//!   `LOG_LEVEL`
//! - [`TracingLogger`] and [`init`]: bridge into the `tracing` ecosystem
//! - [`test_capture`]: in-memory capture for assertions
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use ctxkit_core_types::Context;
//! use ctxkit_logging::{attach_logger, fields, infof, logger_from_context, JsonLogger, Logger};
//!
//! fn handle(ctx: &Context) {
//!     let logger = logger_from_context(ctx);
//!     infof!(logger, "handling {} items", 3);
//!     logger.infow("done", &fields!["items" => 3]);
//! }
//!
//! // Nothing attached: records go to the no-op fallback
//! handle(&Context::background());
//!
//! let ctx = attach_logger(&Context::background(), Arc::new(JsonLogger::from_env()));
//! handle(&ctx);
//! ```

pub mod context;
pub mod errors;
pub mod fallback;
pub mod init;
pub mod json;
pub mod logger;
pub mod macros;
pub mod noop;
pub mod test_capture;
pub mod tracing_bridge;

pub use context::{
    attach_logger, logger_from_context, logger_from_context_or, scoped_logger, LoggerContextExt,
};
pub use errors::{LoggingError, Result};
pub use fallback::{fallback, has_fallback, set_fallback};
pub use init::{init, Profile};
pub use json::{ExitHook, JsonLogger, FATAL_EXIT_CODE};
pub use logger::{concat_args, Field, Fields, Level, LogArg, Logger, Plain, LOG_LEVEL_ENV};
pub use noop::{noop, NoopLogger};
pub use test_capture::{init_test_capture, CaptureLogger, CapturedEvent, CapturedRecord};
pub use tracing_bridge::{TracingLogger, TRACING_TARGET};
