//! One-shot generation calls: dialogues and graded texts
//!
//! Never cached and never retried automatically; a failure surfaces
//! straight to the caller, which owns the "try again" affordance. Each
//! successful call is announced to the analytics sink.

use std::sync::Arc;

use crate::analytics::{AnalyticsEvent, DeviceType, EventSink};
use crate::client::fetcher::{fetch_json, FetchError, Fetcher};
use crate::domain::{Complexity, DialogueResponse, GradedTextResponse, HskLevel};

/// Client for the generation proxy routes
pub struct GenerationClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    events: Arc<dyn EventSink>,
    device_type: DeviceType,
}

impl GenerationClient {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        base_url: impl Into<String>,
        events: Arc<dyn EventSink>,
        device_type: DeviceType,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            events,
            device_type,
        }
    }

    /// Generate a dialogue for the level at the given complexity
    pub async fn dialogue(
        &self,
        level: HskLevel,
        complexity: Complexity,
    ) -> Result<DialogueResponse, FetchError> {
        let url = format!(
            "{}/api/hsk-sources/{}/generate-dialogue?complexity={}",
            self.base_url, level, complexity
        );
        let response: DialogueResponse = fetch_json(self.fetcher.as_ref(), &url).await?;

        self.events.record(AnalyticsEvent::DialogueGenerate {
            hsk_level: *level.as_ref(),
            complexity: *complexity.as_ref(),
            device_type: self.device_type,
        });

        Ok(response)
    }

    /// Generate a graded text for the level at the given complexity
    pub async fn graded_text(
        &self,
        level: HskLevel,
        complexity: Complexity,
    ) -> Result<GradedTextResponse, FetchError> {
        let url = format!(
            "{}/api/hsk-sources/{}/generate-graded-text?complexity={}",
            self.base_url, level, complexity
        );
        let response: GradedTextResponse = fetch_json(self.fetcher.as_ref(), &url).await?;

        self.events.record(AnalyticsEvent::GradedTextGenerate {
            hsk_level: *level.as_ref(),
            complexity: *complexity.as_ref(),
            device_type: self.device_type,
        });

        Ok(response)
    }
}
