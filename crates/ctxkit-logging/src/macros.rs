//! Convenience macros for building fields and template records

/// Build [`Fields`](crate::Fields) from `key => value` pairs
///
/// Keys are anything convertible into `Cow<'static, str>`, values anything
/// convertible into `serde_json::Value`.
///
/// # Example
///
/// ```
/// use ctxkit_logging::fields;
///
/// let fields = fields!["user" => "alice", "attempt" => 3];
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::Fields as ::std::iter::FromIterator<$crate::Field>>::from_iter([
            $($crate::Field::new($key, $value)),+
        ])
    };
}

/// Emit a debug record from a format template
///
/// ```
/// # use ctxkit_logging::{debugf, noop};
/// let logger = noop();
/// debugf!(logger, "cache size {}", 12);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::debugf(&*$logger, ::std::format_args!($($arg)+))
    };
}

/// Emit an info record from a format template
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::infof(&*$logger, ::std::format_args!($($arg)+))
    };
}

/// Emit a warn record from a format template
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::warnf(&*$logger, ::std::format_args!($($arg)+))
    };
}

/// Emit an error record from a format template
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::errorf(&*$logger, ::std::format_args!($($arg)+))
    };
}

/// Emit a fatal record from a format template, then terminate
///
/// With a real backend this does not return.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::fatalf(&*$logger, ::std::format_args!($($arg)+))
    };
}
