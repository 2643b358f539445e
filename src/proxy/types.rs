//! Type definitions for the proxy module

use nutype::nutype;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Base URL of the private upstream API
///
/// Trailing slashes are stripped so path templates can be appended directly.
#[nutype(
    sanitize(trim, with = |host: String| host.trim_end_matches('/').to_string()),
    validate(regex = r"^https?://\S+$"),
    derive(Clone, Debug, Display, PartialEq, Eq, Serialize, Deserialize, TryFrom, AsRef),
)]
pub struct ApiHost(String);

/// Server-held bearer credential for the upstream API
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize, TryFrom, AsRef),
)]
pub struct ApiKey(String);

/// Upstream connection parameters, resolved once at startup
///
/// Handlers never read ambient environment; a service constructed without
/// this config answers every proxied route with a configuration error.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub api_host: ApiHost,
    pub api_key: ApiKey,
}

/// Request ID for log/response correlation
#[derive(
    Clone,
    Copy,
    Debug,
    derive_more::Display,
    derive_more::From,
    derive_more::AsRef,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Create a new RequestId with a v7 UUID
    pub fn new() -> Self {
        Self::from(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur while bridging a request upstream
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API configuration missing")]
    ConfigurationMissing,

    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("upstream request failed: {0}")]
    Connection(String),

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid upstream URL: {0}")]
    InvalidUpstreamUrl(String),

    #[error("upstream body could not be read: {0}")]
    Body(String),

    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),
}

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;
