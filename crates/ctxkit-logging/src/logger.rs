//! Logger capability
//!
//! A [`Logger`] offers five severities in three call shapes:
//!
//! - positional: `info(&[&"user ", &id])` joins the arguments' `Display` forms,
//!   with a space between two adjacent arguments that are both non-text
//! - template: `infof(format_args!(..))`, usually through [`infof!`](crate::infof)
//! - key/value: `infow("msg", &fields)` emits the message plus structured fields
//!
//! plus [`Logger::with`], which derives a child logger carrying extra fields.
//!
//! Backends only implement [`Logger::emit`], [`Logger::with`] and
//! [`Logger::terminate`]; the leveled methods route through `emit`.

use std::borrow::Cow;
use std::fmt::{self, Display, Write as _};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use ctxkit_core_types::{RequestId, TraceId};
use serde_json::{Map, Value};

use crate::errors::{LoggingError, Result};

/// Environment variable holding the minimum severity for env-configured loggers
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Log severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    /// Emitted right before the process terminates
    Fatal,
}

impl Level {
    /// All levels, least severe first
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Upper-case name used in rendered records
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Resolve a configured threshold
    ///
    /// Recognises `debug`, `info`, `warn`/`warning` and `error` in any case.
    /// Anything else, including an absent value, yields `Info`.
    pub fn from_env_value(value: Option<&str>) -> Level {
        value
            .and_then(|raw| raw.parse::<Level>().ok())
            .filter(|level| *level != Level::Fatal)
            .unwrap_or(Level::Info)
    }

    /// Read the threshold from `LOG_LEVEL`
    pub fn from_env() -> Level {
        Self::from_env_value(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LoggingError::UnknownLevel(s.to_string())),
        }
    }
}

/// One structured key/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Ordered sequence of structured fields
///
/// Duplicate keys are kept in order; when a record is rendered the later
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<Field>);

impl Fields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a field
    pub fn push(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) {
        self.0.push(Field::new(key, value));
    }

    /// Build fields from a loosely typed alternating key/value list
    ///
    /// # Errors
    ///
    /// - `OddKeyValues` when the list has odd length
    /// - `NonStringKey` when a key position holds anything but a JSON string
    pub fn from_flat<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let values: Vec<Value> = values.into_iter().collect();
        if values.len() % 2 != 0 {
            return Err(LoggingError::OddKeyValues { len: values.len() });
        }

        let mut fields = Vec::with_capacity(values.len() / 2);
        let mut iter = values.into_iter().enumerate();
        while let (Some((index, key)), Some((_, value))) = (iter.next(), iter.next()) {
            match key {
                Value::String(key) => fields.push(Field::new(key, value)),
                _ => return Err(LoggingError::NonStringKey { index }),
            }
        }
        Ok(Self(fields))
    }

    /// These fields followed by `extra`
    #[must_use]
    pub fn merged(&self, extra: &[Field]) -> Self {
        let mut fields = Vec::with_capacity(self.0.len() + extra.len());
        fields.extend_from_slice(&self.0);
        fields.extend_from_slice(extra);
        Self(fields)
    }

    /// Render as a JSON object, later keys overwriting earlier ones
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for field in &self.0 {
            map.insert(field.key().to_string(), field.value().clone());
        }
        map
    }

}

impl Deref for Fields {
    type Target = [Field];

    fn deref(&self) -> &[Field] {
        &self.0
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Fields {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Leveled logging capability
///
/// # Termination
///
/// The `fatal*` family emits at [`Level::Fatal`] and then calls
/// [`Logger::terminate`]. Backends that write somewhere real must end the
/// process there with a non-zero status and never return. Stand-ins such as
/// [`NoopLogger`](crate::NoopLogger) and test doubles return normally.
pub trait Logger: Send + Sync + 'static {
    /// Write one record. Called only for enabled levels by the leveled methods.
    fn emit(&self, level: Level, message: &str, fields: &[Field]);

    /// Derive a logger that adds `fields` to every record. The receiver is unchanged.
    fn with(&self, fields: &[Field]) -> Arc<dyn Logger>;

    /// Called after a fatal record has been emitted.
    fn terminate(&self);

    /// Whether records at `level` would be written
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn debug(&self, args: &[&dyn LogArg]) {
        emit_args(self, Level::Debug, args);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        emit_fmt(self, Level::Debug, args);
    }

    fn debugw(&self, msg: &str, fields: &[Field]) {
        emit_kv(self, Level::Debug, msg, fields);
    }

    fn info(&self, args: &[&dyn LogArg]) {
        emit_args(self, Level::Info, args);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        emit_fmt(self, Level::Info, args);
    }

    fn infow(&self, msg: &str, fields: &[Field]) {
        emit_kv(self, Level::Info, msg, fields);
    }

    fn warn(&self, args: &[&dyn LogArg]) {
        emit_args(self, Level::Warn, args);
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        emit_fmt(self, Level::Warn, args);
    }

    fn warnw(&self, msg: &str, fields: &[Field]) {
        emit_kv(self, Level::Warn, msg, fields);
    }

    fn error(&self, args: &[&dyn LogArg]) {
        emit_args(self, Level::Error, args);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        emit_fmt(self, Level::Error, args);
    }

    fn errorw(&self, msg: &str, fields: &[Field]) {
        emit_kv(self, Level::Error, msg, fields);
    }

    /// Emit at fatal severity, then [`terminate`](Logger::terminate)
    fn fatal(&self, args: &[&dyn LogArg]) {
        emit_args(self, Level::Fatal, args);
        self.terminate();
    }

    /// Emit at fatal severity, then [`terminate`](Logger::terminate)
    fn fatalf(&self, args: fmt::Arguments<'_>) {
        emit_fmt(self, Level::Fatal, args);
        self.terminate();
    }

    /// Emit at fatal severity, then [`terminate`](Logger::terminate)
    fn fatalw(&self, msg: &str, fields: &[Field]) {
        emit_kv(self, Level::Fatal, msg, fields);
        self.terminate();
    }
}

/// One argument of a positional logging call
///
/// Text arguments are joined to their neighbours as-is. Two adjacent
/// non-text arguments are separated by a single space, so `&[&3, &4]`
/// renders as `3 4` while `&[&"id=", &3]` renders as `id=3`.
///
/// Implemented for the primitive and string types. Wrap any other
/// `Display` value in [`Plain`] to pass it as a non-text argument.
pub trait LogArg: Display {
    /// Whether this argument is text
    fn is_text(&self) -> bool {
        false
    }
}

/// Adapter passing any `Display` value as a non-text [`LogArg`]
#[derive(Debug, Clone, Copy)]
pub struct Plain<T>(pub T);

impl<T: Display> Display for Plain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: Display> LogArg for Plain<T> {}

impl<T: LogArg + ?Sized> LogArg for &T {
    fn is_text(&self) -> bool {
        (**self).is_text()
    }
}

macro_rules! text_args {
    ($($ty:ty),*) => {
        $(impl LogArg for $ty {
            fn is_text(&self) -> bool {
                true
            }
        })*
    };
}

macro_rules! plain_args {
    ($($ty:ty),*) => {
        $(impl LogArg for $ty {})*
    };
}

text_args!(str, String, Cow<'_, str>, Arc<str>, Box<str>, char);
plain_args!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, Value,
    RequestId, TraceId
);

impl LogArg for fmt::Arguments<'_> {
    fn is_text(&self) -> bool {
        true
    }
}

impl LogArg for dyn std::error::Error + '_ {}

impl LogArg for dyn std::error::Error + Send + Sync + '_ {}

/// Join positional arguments, spacing adjacent non-text arguments
pub fn concat_args(args: &[&dyn LogArg]) -> String {
    let mut message = String::new();
    let mut previous_text = true;
    for (index, arg) in args.iter().enumerate() {
        let text = arg.is_text();
        if index > 0 && !text && !previous_text {
            message.push(' ');
        }
        let _ = write!(message, "{arg}");
        previous_text = text;
    }
    message
}

fn emit_args<L: Logger + ?Sized>(logger: &L, level: Level, args: &[&dyn LogArg]) {
    if logger.enabled(level) {
        logger.emit(level, &concat_args(args), &[]);
    }
}

fn emit_fmt<L: Logger + ?Sized>(logger: &L, level: Level, args: fmt::Arguments<'_>) {
    if logger.enabled(level) {
        match args.as_str() {
            Some(message) => logger.emit(level, message, &[]),
            None => logger.emit(level, &fmt::format(args), &[]),
        }
    }
}

fn emit_kv<L: Logger + ?Sized>(logger: &L, level: Level, msg: &str, fields: &[Field]) {
    if logger.enabled(level) {
        logger.emit(level, msg, fields);
    }
}
