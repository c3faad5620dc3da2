//! Process-wide fallback logger
//!
//! Used when a context carries no logger. The cell is written at most once,
//! normally from `main` before any concurrent work starts; until then the
//! shared no-op logger stands in.

use std::sync::{Arc, OnceLock};

use crate::errors::{LoggingError, Result};
use crate::logger::Logger;
use crate::noop::noop;

static FALLBACK: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// The installed fallback logger, or the shared no-op logger
pub fn fallback() -> Arc<dyn Logger> {
    FALLBACK.get().cloned().unwrap_or_else(noop)
}

/// Install the process-wide fallback logger
///
/// # Errors
///
/// Returns `FallbackAlreadySet` if a fallback was installed earlier. The
/// earlier logger stays in place.
pub fn set_fallback(logger: Arc<dyn Logger>) -> Result<()> {
    FALLBACK
        .set(logger)
        .map_err(|_| LoggingError::FallbackAlreadySet)
}

/// Whether a fallback has been installed
pub fn has_fallback() -> bool {
    FALLBACK.get().is_some()
}
