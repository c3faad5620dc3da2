//! Test capture for deterministic logging assertions
//!
//! Two capture points:
//!
//! - [`CaptureLogger`], an in-memory [`Logger`] to attach to a context
//! - [`init_test_capture`], a global `tracing` layer recording the events
//!   produced by [`TracingLogger`](crate::TracingLogger)

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::Visit;
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::logger::{Field, Fields, Level, Logger};

/// One record seen by a [`CaptureLogger`]
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedRecord {
    pub level: Level,
    pub message: String,
    /// Bound fields followed by the call's fields
    pub fields: Fields,
}

/// A logger that keeps every record in memory
///
/// Clones and derived loggers share the same buffer. `terminate` only counts
/// the request, so fatal calls return.
#[derive(Clone)]
pub struct CaptureLogger {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
    terminations: Arc<AtomicUsize>,
    min_level: Level,
    fields: Fields,
}

impl CaptureLogger {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            terminations: Arc::new(AtomicUsize::new(0)),
            min_level: Level::Debug,
            fields: Fields::new(),
        }
    }

    /// Create with a specific minimum level
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Get all captured records
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Whether any captured message contains `text`
    pub fn contains(&self, text: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(text))
    }

    /// Count records at `level`
    pub fn count(&self, level: Level) -> usize {
        self.records().iter().filter(|r| r.level == level).count()
    }

    /// Number of times termination was requested
    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }

    /// Clear all captured records
    pub fn clear(&self) {
        self.records.lock().map(|mut r| r.clear()).ok();
    }
}

impl Default for CaptureLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for CaptureLogger {
    fn emit(&self, level: Level, message: &str, fields: &[Field]) {
        let captured = CapturedRecord {
            level,
            message: message.to_string(),
            fields: self.fields.merged(fields),
        };

        self.records
            .lock()
            .map(|mut records| records.push(captured))
            .ok();
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Logger> {
        Arc::new(CaptureLogger {
            records: Arc::clone(&self.records),
            terminations: Arc::clone(&self.terminations),
            min_level: self.min_level,
            fields: self.fields.merged(fields),
        })
    }

    fn terminate(&self) {
        self.terminations.fetch_add(1, Ordering::SeqCst);
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }
}

/// A captured `tracing` event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub target: String,
    pub message: Option<String>,
    pub fields: HashMap<String, String>,
}

struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

/// Test capture layer for collecting `tracing` events
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: events.clone(),
        };
        let capture = TestCapture { events };
        (layer, capture)
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.fields.remove("message"),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for accessing captured `tracing` events in tests
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events whose message equals `message`
    pub fn events_with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message.as_deref() == Some(message))
            .collect()
    }

    /// Assert that an event with the given message exists
    ///
    /// # Panics
    ///
    /// Panics if the event is not found
    pub fn assert_event_exists(&self, message: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.message.as_deref() == Some(message));
        assert!(
            found,
            "Expected event message={} not found in {} captured events",
            message,
            events.len()
        );
    }

    /// Clear all captured events
    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize test capture mode
///
/// Installs the capture layer as the global subscriber on first use and
/// returns the shared handle. Tests should log unique messages, since every
/// test in the binary writes into the same buffer.
///
/// # Example
///
/// ```
/// use ctxkit_logging::test_capture::init_test_capture;
/// use ctxkit_logging::{Logger, TracingLogger};
///
/// let capture = init_test_capture();
/// TracingLogger::new().infow("doc_example_event", &[]);
/// capture.assert_event_exists("doc_example_event");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}
