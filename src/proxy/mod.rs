//! Proxy module bridging public clients to the private HSK API
//!
//! Three route instances share one forwarding core:
//! - Word listing (cacheable, one-hour shared cache window)
//! - Dialogue generation (non-idempotent, never cached)
//! - Graded-text generation (non-idempotent, never cached)
//!
//! The server-held bearer credential is injected here and never reaches
//! the client; every failure collapses to a structured JSON 500.

pub mod error_response;
pub mod headers;
pub mod service;
pub mod types;
pub mod upstream;

pub use service::ProxyService;
pub use types::{ProxyError, ProxyResult, RequestId, UpstreamConfig};
