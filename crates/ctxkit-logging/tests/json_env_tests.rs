#![allow(clippy::unwrap_used, clippy::expect_used)]

//! `LOG_LEVEL` is process-wide, so this binary holds a single test.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ctxkit_logging::{JsonLogger, Level, Logger, LOG_LEVEL_ENV};

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
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_threshold_follows_log_level() {
    // Unset: info
    std::env::remove_var(LOG_LEVEL_ENV);
    let buffer = SharedBuffer::default();
    let logger = JsonLogger::from_env_with_writer(buffer.clone());
    assert_eq!(logger.level(), Level::Info);

    logger.debug(&[&"debug line"]);
    assert!(buffer.lines().is_empty());

    logger.info(&[&"info line"]);
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("info line"));

    // Recognised values, any case
    for (raw, expected) in [
        ("DEBUG", Level::Debug),
        ("warning", Level::Warn),
        ("Warn", Level::Warn),
        ("error", Level::Error),
    ] {
        std::env::set_var(LOG_LEVEL_ENV, raw);
        let logger = JsonLogger::from_env_with_writer(SharedBuffer::default());
        assert_eq!(logger.level(), expected, "LOG_LEVEL={raw}");
    }

    // Unrecognised: info
    std::env::set_var(LOG_LEVEL_ENV, "chatty");
    assert_eq!(JsonLogger::from_env_with_writer(io::sink()).level(), Level::Info);

    // The threshold is read once, at construction
    std::env::set_var(LOG_LEVEL_ENV, "debug");
    let buffer = SharedBuffer::default();
    let logger = JsonLogger::from_env_with_writer(buffer.clone());
    std::env::set_var(LOG_LEVEL_ENV, "error");
    logger.debug(&[&"still debug"]);
    assert_eq!(buffer.lines().len(), 1);

    std::env::remove_var(LOG_LEVEL_ENV);
}
