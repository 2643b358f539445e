//! Usage analytics as an injected capability
//!
//! Events are fire-and-forget: `record` returns nothing and must never
//! fail the caller. Production wires a tracing-backed sink; tests inject a
//! recording double.

use chrono::{DateTime, Utc};
use derive_more::Display;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::info;

/// Device class dimension attached to interaction events
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[display("desktop")]
    Desktop,
    #[display("mobile")]
    Mobile,
}

/// Show/hide direction for the translation toggle
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    #[display("show")]
    Show,
    #[display("hide")]
    Hide,
}

/// The app's interaction event vocabulary
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    PageView {
        page_path: String,
        page_title: Option<String>,
    },
    HskLevelSelect {
        from_level: Option<u8>,
        to_level: u8,
        device_type: DeviceType,
    },
    DialogueGenerate {
        hsk_level: u8,
        complexity: u8,
        device_type: DeviceType,
    },
    GradedTextGenerate {
        hsk_level: u8,
        complexity: u8,
        device_type: DeviceType,
    },
    HanziShuffle {
        hsk_level: u8,
        word_count: usize,
        device_type: DeviceType,
    },
    HanziPopoverOpen {
        hsk_level: u8,
        word_id: String,
        device_type: DeviceType,
    },
    GradedTextWordClick {
        word: String,
        hsk_level: u8,
        device_type: DeviceType,
    },
    TranslationToggle {
        action: ToggleAction,
        device_type: DeviceType,
    },
    TabSwitch {
        from_tab: String,
        to_tab: String,
        feature_type: String,
    },
}

/// Capability seam for the analytics backend
pub trait EventSink: Send + Sync {
    /// Record an event; implementations must not block or fail the caller
    fn record(&self, event: AnalyticsEvent);
}

/// Production sink: events become structured log lines
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: AnalyticsEvent) {
        // Serialization of our own enum cannot fail; fall back to Debug if
        // the representation ever changes out from under us.
        match serde_json::to_string(&event) {
            Ok(payload) => info!(target: "analytics", %payload, "event"),
            Err(_) => info!(target: "analytics", ?event, "event"),
        }
    }
}

/// Sink that drops everything, for surfaces with analytics disabled
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record(&self, _event: AnalyticsEvent) {}
}

/// Test double that captures recorded events with their timestamps
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<(DateTime<Utc>, AnalyticsEvent)>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .iter()
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingEventSink {
    fn record(&self, event: AnalyticsEvent) {
        self.events.lock().push((Utc::now(), event));
    }
}
