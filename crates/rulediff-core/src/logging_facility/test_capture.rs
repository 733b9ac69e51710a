//! In-memory event capture for logging assertions
//!
//! Tests of one binary share a single global buffer, so helpers here filter
//! by operation name; give each test its own `op` or alert name.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, EVENT_WARNING};

/// One recorded event; every field is kept as text
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedEvent {
    pub level: Level,
    fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn new(level: Level, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            level,
            fields: fields.into_iter().collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field("op")
    }

    /// `start`, `end`, `end_error` or `warning`
    pub fn event(&self) -> Option<&str> {
        self.field("event")
    }

    pub fn component(&self) -> Option<&str> {
        self.field("component")
    }

    /// The formatted message, for events logged with one
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

/// Strings verbatim, everything else through `Debug`
#[derive(Default)]
struct FieldText(BTreeMap<String, String>);

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

// A test that panics mid-push must not hide later events from other tests
fn lock(buffer: &Buffer) -> MutexGuard<'_, Vec<CapturedEvent>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Layer appending every event to a shared buffer
pub struct TestCaptureLayer {
    buffer: Buffer,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let buffer = Buffer::default();
        (
            Self {
                buffer: Arc::clone(&buffer),
            },
            TestCapture { buffer },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText::default();
        event.record(&mut text);
        lock(&self.buffer).push(CapturedEvent::new(*event.metadata().level(), text.0));
    }
}

/// Read side of the capture buffer
#[derive(Clone)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    /// Everything captured so far, oldest first
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.buffer).clone()
    }

    /// Events of one operation, oldest first
    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.op() == Some(op))
    }

    /// Duplicate-alert warnings raised for `alert`
    pub fn warnings_for_alert(&self, alert: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.event() == Some(EVENT_WARNING) && e.field("alert") == Some(alert))
    }

    /// # Panics
    ///
    /// When no event of `op` carries `event`
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let seen: Vec<String> = self
            .events_for(op)
            .iter()
            .filter_map(|e| e.event().map(str::to_string))
            .collect();
        assert!(
            seen.iter().any(|e| e == event),
            "no {} event for op {}; saw {:?}",
            event,
            op,
            seen
        );
    }

    /// Every `start` of `op` is followed by an `end` or `end_error`
    ///
    /// # Panics
    ///
    /// When `op` never started or a start has no closing event
    pub fn assert_op_closed(&self, op: &str) {
        let mut open = 0usize;
        let mut started = false;
        for event in self.events_for(op) {
            match event.event() {
                Some(EVENT_START) => {
                    open += 1;
                    started = true;
                }
                Some(EVENT_END | EVENT_END_ERROR) => open = open.saturating_sub(1),
                _ => {}
            }
        }
        assert!(started, "op {} never started", op);
        assert_eq!(open, 0, "op {} has {} unclosed start events", op, open);
    }

    fn filtered(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        lock(&self.buffer).iter().filter(|e| keep(e)).cloned().collect()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber on first call
///
/// If another subscriber already owns the process, nothing is captured.
///
/// ```
/// use rulediff_core::logging_facility::test_capture::init_test_capture;
/// use rulediff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_load_example");
/// capture.assert_event_exists("doc_load_example", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}
