use thiserror::Error;

/// Result type alias using LoggingError
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Errors raised by the fallible constructors of the logging facade
///
/// The facade operations themselves (attach, retrieve, leveled calls) are
/// total and never return these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoggingError {
    #[error("key/value list has odd length {len}: the last key has no value")]
    OddKeyValues { len: usize },

    #[error("key at position {index} is not a string")]
    NonStringKey { index: usize },

    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),

    #[error("fallback logger is already installed")]
    FallbackAlreadySet,
}

impl LoggingError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::OddKeyValues { .. } => "ERR_ODD_KEY_VALUES",
            LoggingError::NonStringKey { .. } => "ERR_NON_STRING_KEY",
            LoggingError::UnknownLevel(_) => "ERR_UNKNOWN_LEVEL",
            LoggingError::FallbackAlreadySet => "ERR_FALLBACK_ALREADY_SET",
        }
    }
}
