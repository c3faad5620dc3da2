//! Bridge into the `tracing` ecosystem
//!
//! [`TracingLogger`] turns each record into a `tracing` event under the
//! `ctxkit` target, so whatever subscriber the application installed (see
//! [`init`](crate::init)) decides formatting and filtering. Structured fields
//! travel as one JSON object under the `fields` key because `tracing` field
//! names are fixed at compile time.

use std::sync::Arc;

use serde_json::Value;

use crate::json::{ExitHook, FATAL_EXIT_CODE};
use crate::logger::{Field, Fields, Level, Logger};

/// Target of every event emitted by [`TracingLogger`]
pub const TRACING_TARGET: &str = "ctxkit";

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error | Level::Fatal => tracing::Level::ERROR,
        }
    }
}

/// Logger forwarding records to the current `tracing` dispatcher
#[derive(Debug, Clone)]
pub struct TracingLogger {
    fields: Fields,
    exit_hook: ExitHook,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self {
            fields: Fields::new(),
            exit_hook: std::process::exit,
        }
    }

    /// Replace the hook run after a fatal record (default: `std::process::exit`)
    #[must_use]
    pub fn with_exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = hook;
        self
    }

    /// Fields added to every record by this logger
    pub fn bound_fields(&self) -> &Fields {
        &self.fields
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for TracingLogger {
    fn emit(&self, level: Level, message: &str, fields: &[Field]) {
        let fields = Value::Object(self.fields.merged(fields).to_json_map()).to_string();

        // Field names are literals here; `fields` is schema::FIELD_FIELDS
        match level {
            Level::Debug => {
                tracing::debug!(target: TRACING_TARGET, fields = %fields, "{}", message)
            }
            Level::Info => {
                tracing::info!(target: TRACING_TARGET, fields = %fields, "{}", message)
            }
            Level::Warn => {
                tracing::warn!(target: TRACING_TARGET, fields = %fields, "{}", message)
            }
            Level::Error => {
                tracing::error!(target: TRACING_TARGET, fields = %fields, "{}", message)
            }
            Level::Fatal => {
                tracing::error!(
                    target: TRACING_TARGET,
                    fatal = true,
                    fields = %fields,
                    "{}",
                    message
                )
            }
        }
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Logger> {
        Arc::new(TracingLogger {
            fields: self.fields.merged(fields),
            exit_hook: self.exit_hook,
        })
    }

    fn terminate(&self) {
        (self.exit_hook)(FATAL_EXIT_CODE)
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => tracing::enabled!(target: TRACING_TARGET, tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: TRACING_TARGET, tracing::Level::INFO),
            Level::Warn => tracing::enabled!(target: TRACING_TARGET, tracing::Level::WARN),
            Level::Error | Level::Fatal => {
                tracing::enabled!(target: TRACING_TARGET, tracing::Level::ERROR)
            }
        }
    }
}
