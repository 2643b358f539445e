//! HTTP header constants and route paths for the proxy service

use ::http::header;

/// Header name for request ID used for tracing and correlation
pub const X_REQUEST_ID: &str = "x-request-id";

/// Authorization header prefix for bearer tokens
pub const BEARER_PREFIX: &str = "Bearer ";

/// Cache directive for the word-listing route: shared caching for one hour
/// with a one-day stale-while-revalidate window
pub const WORDS_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// JSON content type sent upstream and relayed back
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Standard header re-exports for convenience
pub use header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};

/// Client-facing and upstream route paths
pub mod paths {
    /// Health check endpoint path
    pub const HEALTH: &str = "/health";

    /// Client-facing word listing route
    pub const WORDS: &str = "/api/hsk-words/{level}";

    /// Client-facing dialogue generation route
    pub const GENERATE_DIALOGUE: &str = "/api/hsk-sources/{level}/generate-dialogue";

    /// Client-facing graded-text generation route
    pub const GENERATE_GRADED_TEXT: &str = "/api/hsk-sources/{level}/generate-graded-text";
}

/// Query parameter defaults applied when the client omits them
///
/// Kept as strings: the routes forward whatever they receive and leave
/// validation to the upstream.
pub mod defaults {
    pub const PAGE: &str = "1";
    pub const LIMIT: &str = "200";
    pub const COMPLEXITY: &str = "1";
}
