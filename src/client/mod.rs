//! Client-side data access fronting the proxy routes
//!
//! - `fetcher`: GET-and-parse-JSON primitive with a precise error taxonomy
//! - `words_cache`: read-through cache with single-flight deduplication
//! - `generate`: one-shot dialogue/graded-text calls, never cached or retried

pub mod fetcher;
pub mod generate;
pub mod words_cache;

pub use fetcher::{fetch_json, FetchError, Fetcher, HttpFetcher};
pub use generate::GenerationClient;
pub use words_cache::{CachePolicy, ConnectivityEvent, WordsCache, WordsQuery, WordsView};
