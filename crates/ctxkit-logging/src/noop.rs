//! Logger that does nothing
//!
//! Returned whenever a context carries no logger and no fallback has been
//! installed, so callers can log unconditionally.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::logger::{Field, Level, LogArg, Logger};

/// Stateless logger whose every method is a no-op
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLogger;

static NOOP: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// The process-wide shared no-op logger
///
/// Every call returns the same instance.
pub fn noop() -> Arc<dyn Logger> {
    NOOP.get_or_init(|| Arc::new(NoopLogger) as Arc<dyn Logger>).clone()
}

impl Logger for NoopLogger {
    fn emit(&self, _level: Level, _message: &str, _fields: &[Field]) {}

    /// Fields are discarded; the shared instance is returned.
    fn with(&self, _fields: &[Field]) -> Arc<dyn Logger> {
        noop()
    }

    fn terminate(&self) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn debug(&self, _args: &[&dyn LogArg]) {}
    fn debugf(&self, _args: fmt::Arguments<'_>) {}
    fn debugw(&self, _msg: &str, _fields: &[Field]) {}
    fn info(&self, _args: &[&dyn LogArg]) {}
    fn infof(&self, _args: fmt::Arguments<'_>) {}
    fn infow(&self, _msg: &str, _fields: &[Field]) {}
    fn warn(&self, _args: &[&dyn LogArg]) {}
    fn warnf(&self, _args: fmt::Arguments<'_>) {}
    fn warnw(&self, _msg: &str, _fields: &[Field]) {}
    fn error(&self, _args: &[&dyn LogArg]) {}
    fn errorf(&self, _args: fmt::Arguments<'_>) {}
    fn errorw(&self, _msg: &str, _fields: &[Field]) {}
    fn fatal(&self, _args: &[&dyn LogArg]) {}
    fn fatalf(&self, _args: fmt::Arguments<'_>) {}
    fn fatalw(&self, _msg: &str, _fields: &[Field]) {}
}
