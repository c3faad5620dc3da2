//! JSON-lines reference adapter
//!
//! [`JsonLogger`] writes one JSON object per record:
//!
//! ```text
//! {"time":"2024-05-01T10:00:00.000Z","level":"INFO","msg":"started","port":8080}
//! ```
//!
//! The envelope keys come first, then the logger's bound fields, then the
//! call's fields. A later key overwrites an earlier one of the same name.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use ctxkit_core_types::schema::{FIELD_LEVEL, FIELD_MSG, FIELD_TIME};
use serde_json::{Map, Value};

use crate::logger::{Field, Fields, Level, Logger};

/// Called with the exit status once a fatal record is written
pub type ExitHook = fn(i32) -> !;

/// Exit status used by the fatal family
pub const FATAL_EXIT_CODE: i32 = 1;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Structured logger writing JSON lines to a sink (stdout by default)
#[derive(Clone)]
pub struct JsonLogger {
    sink: Sink,
    min_level: Level,
    fields: Fields,
    exit_hook: ExitHook,
}

impl JsonLogger {
    /// Logger on stdout with the threshold read from `LOG_LEVEL`
    pub fn from_env() -> Self {
        Self::from_env_with_writer(io::stdout())
    }

    /// Logger on `writer` with the threshold read from `LOG_LEVEL`
    pub fn from_env_with_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_writer(Level::from_env(), writer)
    }

    /// Logger on `writer` with an explicit threshold
    pub fn with_writer<W>(min_level: Level, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
            min_level,
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

    /// Minimum level written
    pub fn level(&self) -> Level {
        self.min_level
    }

    /// Fields added to every record by this logger
    pub fn bound_fields(&self) -> &Fields {
        &self.fields
    }

    fn render(&self, level: Level, message: &str, fields: &[Field]) -> String {
        let mut record = Map::new();
        record.insert(
            FIELD_TIME.to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert(FIELD_LEVEL.to_string(), Value::from(level.as_str()));
        record.insert(FIELD_MSG.to_string(), Value::from(message));
        for field in self.fields.iter().chain(fields) {
            record.insert(field.key().to_string(), field.value().clone());
        }
        Value::Object(record).to_string()
    }
}

impl Logger for JsonLogger {
    fn emit(&self, level: Level, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        let line = self.render(level, message, fields);

        // A poisoned sink drops the record; logging never panics the caller
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{line}");
            let _ = sink.flush();
        }
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Logger> {
        Arc::new(JsonLogger {
            sink: Arc::clone(&self.sink),
            min_level: self.min_level,
            fields: self.fields.merged(fields),
            exit_hook: self.exit_hook,
        })
    }

    fn terminate(&self) {
        (self.exit_hook)(FATAL_EXIT_CODE)
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }
}

impl fmt::Debug for JsonLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLogger")
            .field("min_level", &self.min_level)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }

        fn records(&self) -> Vec<Value> {
            self.lines()
                .iter()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn panic_exit(code: i32) -> ! {
        panic!("exit requested with status {code}")
    }

    #[test]
    fn test_default_threshold_drops_debug() {
        let buffer = SharedBuffer::default();
        let logger = JsonLogger::with_writer(Level::from_env_value(None), buffer.clone());

        logger.debug(&[&"hidden"]);
        assert!(buffer.lines().is_empty());

        logger.info(&[&"visible"]);
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("visible"));
    }

    #[test]
    fn test_record_layout() {
        let buffer = SharedBuffer::default();
        let logger = JsonLogger::with_writer(Level::Debug, buffer.clone());

        logger.warnw("disk low", &fields!["free_mb" => 12, "mount" => "/data"]);

        let records = buffer.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record[FIELD_LEVEL], "WARN");
        assert_eq!(record[FIELD_MSG], "disk low");
        assert_eq!(record["free_mb"], 12);
        assert_eq!(record["mount"], "/data");
        assert!(record[FIELD_TIME].as_str().unwrap().ends_with('Z'));

        let keys: Vec<_> = record.as_object().unwrap().keys().cloned().collect();
        assert_eq!(&keys[..3], &["time", "level", "msg"]);
    }

    #[test]
    fn test_call_shapes() {
        let buffer = SharedBuffer::default();
        let logger = JsonLogger::with_writer(Level::Debug, buffer.clone());

        logger.error(&[&"code=", &500]);
        logger.debugf(format_args!("{} of {}", 3, 4));
        logger.info(&[&3, &4]);

        let records = buffer.records();
        assert_eq!(records[0][FIELD_MSG], "code=500");
        assert_eq!(records[0][FIELD_LEVEL], "ERROR");
        assert_eq!(records[1][FIELD_MSG], "3 of 4");
        assert_eq!(records[1][FIELD_LEVEL], "DEBUG");
        assert_eq!(records[2][FIELD_MSG], "3 4");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
    }

    #[test]
    fn test_write_errors_are_swallowed() {
        let logger = JsonLogger::with_writer(Level::Debug, FailingWriter);

        logger.infow("lost", &fields!["k" => "v"]);
        logger.error(&[&"lost", &2]);
        logger.with(&fields!["scope" => "child"]).warnw("lost", &[]);
    }

    #[test]
    fn test_poisoned_sink_drops_record() {
        let buffer = SharedBuffer::default();
        let logger = JsonLogger::with_writer(Level::Debug, buffer.clone());

        let sink = Arc::clone(&logger.sink);
        let poisoner = std::thread::spawn(move || {
            let _guard = sink.lock().unwrap();
            panic!("writer thread failed while holding the sink");
        });
        assert!(poisoner.join().is_err());
        assert!(logger.sink.is_poisoned());

        logger.infow("after poison", &[]);

        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn test_with_binds_fields_without_mutating_receiver() {
        let buffer = SharedBuffer::default();
        let logger = JsonLogger::with_writer(Level::Info, buffer.clone());

        let child = logger.with(&fields!["component" => "billing"]);
        child.infow("charged", &fields!["amount" => 30]);
        logger.infow("plain", &[]);

        let records = buffer.records();
        assert_eq!(records[0]["component"], "billing");
        assert_eq!(records[0]["amount"], 30);
        assert!(records[1].get("component").is_none());
        assert!(logger.bound_fields().is_empty());
    }

    #[test]
    fn test_call_fields_override_bound_fields() {
        let buffer = SharedBuffer::default();
        let logger = JsonLogger::with_writer(Level::Info, buffer.clone())
            .with(&fields!["attempt" => 1]);

        logger.infow("retry", &fields!["attempt" => 2]);

        assert_eq!(buffer.records()[0]["attempt"], 2);
    }

    #[test]
    fn test_threshold_filters_each_level() {
        let buffer = SharedBuffer::default();
        let logger = JsonLogger::with_writer(Level::Error, buffer.clone());

        logger.debugw("d", &[]);
        logger.infow("i", &[]);
        logger.warnw("w", &[]);
        logger.errorw("e", &[]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"e\""));
    }

    #[test]
    #[should_panic(expected = "exit requested with status 1")]
    fn test_fatal_runs_exit_hook() {
        let logger = JsonLogger::with_writer(Level::Info, SharedBuffer::default())
            .with_exit_hook(panic_exit);

        logger.fatalw("unrecoverable", &[]);
    }

    #[test]
    fn test_fatal_writes_before_exit() {
        let buffer = SharedBuffer::default();
        let logger =
            JsonLogger::with_writer(Level::Error, buffer.clone()).with_exit_hook(panic_exit);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.fatal(&[&"bye"]);
        }));
        assert!(result.is_err());

        let records = buffer.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0][FIELD_LEVEL], "FATAL");
        assert_eq!(records[0][FIELD_MSG], "bye");
    }

    #[test]
    fn test_derived_logger_keeps_exit_hook() {
        let buffer = SharedBuffer::default();
        let logger =
            JsonLogger::with_writer(Level::Info, buffer.clone()).with_exit_hook(panic_exit);
        let child = logger.with(&fields!["job" => "sync"]);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            child.fatalf(format_args!("job {} failed", 7));
        }));
        assert!(result.is_err());
        assert_eq!(buffer.records()[0]["job"], "sync");
    }
}
