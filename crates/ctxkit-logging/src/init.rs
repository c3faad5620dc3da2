//! Subscriber initialisation for the tracing bridge
//!
//! Provides a single initialisation point for the global `tracing`
//! subscriber that [`TracingLogger`](crate::TracingLogger) forwards into.

use std::sync::Once;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::logger::Level;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Bare registry; tests attach their own capture layer
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Map a threshold onto a `tracing` level filter
pub fn level_filter(level: Level) -> LevelFilter {
    LevelFilter::from_level(level.into())
}

/// Initialize the global subscriber
///
/// This function should be called once at application startup. Later calls,
/// and calls made after another subscriber was installed, are no-ops.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `RUST_LOG` filter, debug by default
/// - **Production**: JSON logs on stdout, threshold from `LOG_LEVEL`
/// - **Test**: Bare registry
///
/// # Example
///
/// ```
/// use ctxkit_logging::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
                )
                .try_init();
        }
        Profile::Production => {
            let _ = tracing_subscriber::fmt()
                .json()
                .with_max_level(level_filter(Level::from_env()))
                .try_init();
        }
        Profile::Test => {
            // Capture layers are installed separately via init_test_capture()
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}
