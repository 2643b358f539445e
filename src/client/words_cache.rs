//! Read-through words cache with single-flight deduplication
//!
//! One process-wide cache slot per `(level, page, limit)` key. Concurrent
//! requesters of the same key share exactly one in-flight fetch; results
//! for one key never land in another key's slot. Entries are created on
//! demand and live until the process ends.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::client::fetcher::{fetch_json, FetchError, Fetcher};
use crate::domain::{HskLevel, PageLimit, PageNumber, VocabularyItem, WordsResponse};

/// Cache key: one slot per (level, page, limit) triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WordsQuery {
    pub level: HskLevel,
    pub page: PageNumber,
    pub limit: PageLimit,
}

impl WordsQuery {
    /// First page of a level at the standard page size
    pub fn for_level(level: HskLevel) -> Self {
        Self {
            level,
            page: PageNumber::first(),
            limit: PageLimit::standard(),
        }
    }

    /// The key serialized as its request path against the proxy surface
    pub fn request_path(&self) -> String {
        format!(
            "/api/hsk-words/{}?page={}&limit={}",
            self.level, self.page, self.limit
        )
    }
}

/// Retry and revalidation policy for the cache
#[derive(Clone, Debug)]
pub struct CachePolicy {
    /// Retries after a failed attempt before the error becomes terminal
    pub error_retry_count: u32,
    /// Fixed spacing between retry attempts
    pub error_retry_interval: Duration,
    /// Whether regaining window focus triggers a refetch
    pub revalidate_on_focus: bool,
    /// Whether reconnecting after being offline triggers a refetch
    pub revalidate_on_reconnect: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            error_retry_count: 3,
            error_retry_interval: Duration::from_secs(5),
            revalidate_on_focus: false,
            revalidate_on_reconnect: true,
        }
    }
}

/// Browser-style connectivity events the cache reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// Network came back after being offline
    Reconnected,
    /// Window regained focus
    FocusRegained,
}

/// Current state of one cache slot, as seen by a consumer
#[derive(Clone, Debug)]
pub struct WordsView {
    /// Latest successful envelope, `None` before first resolution
    pub data: Option<WordsResponse>,
    /// Terminal error of the most recent cycle, stale data retained beside it
    pub error: Option<FetchError>,
    /// True only while fetching with no data ever obtained for the key
    pub is_loading: bool,
    /// True during any fetch, including background revalidation
    pub is_validating: bool,
}

impl WordsView {
    /// The word list, empty before any data has arrived
    pub fn words(&self) -> &[VocabularyItem] {
        self.data
            .as_ref()
            .map(|envelope| envelope.data.list.as_slice())
            .unwrap_or(&[])
    }

    /// Corpus size at this level, zero before any data has arrived
    pub fn total(&self) -> u64 {
        self.data
            .as_ref()
            .map(|envelope| envelope.data.total)
            .unwrap_or(0)
    }
}

type SharedFetch = Shared<BoxFuture<'static, Result<WordsResponse, FetchError>>>;

#[derive(Default)]
struct Entry {
    data: Option<WordsResponse>,
    error: Option<FetchError>,
    inflight: Option<SharedFetch>,
}

/// Process-wide read-through cache fronting the word-listing proxy route
pub struct WordsCache {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    policy: CachePolicy,
    entries: Mutex<HashMap<WordsQuery, Entry>>,
}

impl WordsCache {
    /// Create a cache over `fetcher`, resolving keys against `base_url`
    ///
    /// `base_url` is the proxy origin (empty for same-origin deployments);
    /// the key's request path is appended to it verbatim.
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: impl Into<String>, policy: CachePolicy) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Install a server-prerendered envelope as the initial value
    ///
    /// Applies only when no slot exists for the key yet; the seed counts as
    /// fresh, so the first `get` performs no fetch.
    pub fn seed(&self, query: WordsQuery, envelope: WordsResponse) {
        let mut entries = self.entries.lock();
        entries.entry(query).or_insert_with(|| Entry {
            data: Some(envelope),
            error: None,
            inflight: None,
        });
    }

    /// Read-through: fresh data answers immediately, otherwise joins or
    /// starts the single in-flight fetch for the key.
    pub async fn get(&self, query: WordsQuery) -> WordsView {
        {
            let entries = self.entries.lock();
            if let Some(entry) = entries.get(&query) {
                if entry.data.is_some() {
                    return Self::view(entry);
                }
            }
        }

        self.run_fetch(query).await
    }

    /// Manual revalidation: always fetches, keeping stale data visible while
    /// the new cycle runs. Joins a cycle already in flight instead of
    /// queueing a second one.
    pub async fn revalidate(&self, query: WordsQuery) -> WordsView {
        self.run_fetch(query).await
    }

    /// Current state of the slot without triggering a fetch
    pub fn snapshot(&self, query: WordsQuery) -> WordsView {
        let entries = self.entries.lock();
        entries
            .get(&query)
            .map(Self::view)
            .unwrap_or_else(|| WordsView {
                data: None,
                error: None,
                is_loading: false,
                is_validating: false,
            })
    }

    /// React to a connectivity event according to the configured policy
    pub async fn handle_connectivity(&self, event: ConnectivityEvent) {
        let should_revalidate = match event {
            ConnectivityEvent::Reconnected => self.policy.revalidate_on_reconnect,
            ConnectivityEvent::FocusRegained => self.policy.revalidate_on_focus,
        };
        if !should_revalidate {
            return;
        }

        let keys: Vec<WordsQuery> = self.entries.lock().keys().copied().collect();
        debug!(?event, keys = keys.len(), "revalidating cached keys");
        for key in keys {
            let _ = self.revalidate(key).await;
        }
    }

    async fn run_fetch(&self, query: WordsQuery) -> WordsView {
        let fetch = {
            let mut entries = self.entries.lock();
            let entry = entries.entry(query).or_default();
            match &entry.inflight {
                Some(inflight) => inflight.clone(),
                None => {
                    let started = self.start_fetch(query);
                    entry.inflight = Some(started.clone());
                    started
                }
            }
        };

        let outcome = fetch.clone().await;

        let mut entries = self.entries.lock();
        let entry = entries.entry(query).or_default();

        // Only the cycle that is still current applies its outcome; a view
        // that moved on (new cycle started) must not be clobbered.
        let current = entry
            .inflight
            .as_ref()
            .is_some_and(|inflight| Shared::ptr_eq(inflight, &fetch));
        if current {
            entry.inflight = None;
            match outcome {
                Ok(envelope) => {
                    entry.data = Some(envelope);
                    entry.error = None;
                }
                Err(err) => {
                    entry.error = Some(err);
                }
            }
        }

        Self::view(entry)
    }

    /// One fetch cycle: the retry loop lives inside the shared future so
    /// every joiner observes the same attempts and the same outcome.
    fn start_fetch(&self, query: WordsQuery) -> SharedFetch {
        let fetcher = Arc::clone(&self.fetcher);
        let url = format!("{}{}", self.base_url, query.request_path());
        let retries = self.policy.error_retry_count;
        let interval = self.policy.error_retry_interval;

        async move {
            let mut attempt = 0u32;
            loop {
                match fetch_json::<WordsResponse>(fetcher.as_ref(), &url).await {
                    Ok(envelope) => return Ok(envelope),
                    Err(err) => {
                        if attempt >= retries {
                            return Err(err);
                        }
                        attempt += 1;
                        debug!(url = %url, attempt, "fetch failed, retrying");
                        tokio::time::sleep(interval).await;
                    }
                }
            }
        }
        .boxed()
        .shared()
    }

    fn view(entry: &Entry) -> WordsView {
        WordsView {
            data: entry.data.clone(),
            error: entry.error.clone(),
            is_loading: entry.data.is_none() && entry.inflight.is_some(),
            is_validating: entry.inflight.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_path_serializes_the_key() {
        let query = WordsQuery::for_level(HskLevel::try_new(2).unwrap());
        assert_eq!(query.request_path(), "/api/hsk-words/2?page=1&limit=200");
    }

    #[test]
    fn equal_tuples_share_a_key() {
        let a = WordsQuery::for_level(HskLevel::lowest());
        let b = WordsQuery::for_level(HskLevel::lowest());
        assert_eq!(a, b);
    }

    #[test]
    fn default_policy_retries_three_times_five_seconds_apart() {
        let policy = CachePolicy::default();
        assert_eq!(policy.error_retry_count, 3);
        assert_eq!(policy.error_retry_interval, Duration::from_secs(5));
        assert!(!policy.revalidate_on_focus);
        assert!(policy.revalidate_on_reconnect);
    }

    #[test]
    fn empty_view_has_no_words_and_zero_total() {
        let view = WordsView {
            data: None,
            error: None,
            is_loading: false,
            is_validating: false,
        };
        assert!(view.words().is_empty());
        assert_eq!(view.total(), 0);
    }
}
