//! Client-facing error bodies for the proxy routes
//!
//! Every failure mode answers with HTTP 500 and `{ "error": <message> }`.
//! A missing upstream configuration keeps its own message; everything else
//! collapses to the route's generic message, with the real cause logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::proxy::types::ProxyError;

/// Route-specific generic failure messages
pub mod messages {
    pub const CONFIG_MISSING: &str = "API configuration missing";
    pub const FETCH_WORDS: &str = "Failed to fetch HSK words";
    pub const GENERATE_DIALOGUE: &str = "Failed to generate dialogue";
    pub const GENERATE_GRADED_TEXT: &str = "Failed to generate graded text";
}

/// Standard error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Pick the body for a failed route: configuration problems surface
    /// their own message, everything else gets the route's generic one.
    pub fn for_failure(error: &ProxyError, generic_message: &str) -> Self {
        match error {
            ProxyError::ConfigurationMissing => Self::new(messages::CONFIG_MISSING),
            _ => Self::new(generic_message),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
