//! Main proxy service implementation
//!
//! `ProxyService` owns the upstream configuration and connection pool and
//! exposes the three client-facing routes as an Axum router.
//!
//! ## Service lifecycle
//!
//! ```rust,ignore
//! use hsk_gateway::proxy::{ProxyService, UpstreamConfig};
//!
//! let service = ProxyService::new(Some(upstream_config));
//! let router = service.into_router();
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```
//!
//! Handlers never validate the `level` path segment: it is forwarded as
//! received and the upstream owns range policy. Query parameters are strings
//! for the same reason, defaulted when absent.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header::HeaderValue, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::error;
use uuid::Uuid;

use crate::proxy::error_response::{messages, ErrorBody};
use crate::proxy::headers::{
    defaults, paths, CACHE_CONTROL, CONTENT_TYPE, CONTENT_TYPE_JSON, WORDS_CACHE_CONTROL,
    X_REQUEST_ID,
};
use crate::proxy::types::{ProxyError, ProxyResult, RequestId, UpstreamConfig};
use crate::proxy::upstream::{UpstreamClient, DEFAULT_UPSTREAM_TIMEOUT};

/// Proxy service bridging public routes to the private HSK API
pub struct ProxyService {
    upstream: Option<UpstreamConfig>,
    client: UpstreamClient,
}

impl ProxyService {
    /// Create a new proxy service
    ///
    /// `upstream` is resolved once at startup; `None` means every proxied
    /// route answers with the configuration-missing error and no upstream
    /// call is ever attempted.
    pub fn new(upstream: Option<UpstreamConfig>) -> Self {
        Self::with_timeout(upstream, DEFAULT_UPSTREAM_TIMEOUT)
    }

    /// Create a proxy service with a custom upstream timeout
    pub fn with_timeout(upstream: Option<UpstreamConfig>, timeout: Duration) -> Self {
        Self {
            upstream,
            client: UpstreamClient::new(timeout),
        }
    }

    /// Create an Axum router for the proxy service with middleware
    pub fn into_router(self) -> axum::Router {
        axum::Router::new()
            .route(paths::WORDS, axum::routing::get(words_handler))
            .route(
                paths::GENERATE_DIALOGUE,
                axum::routing::get(generate_dialogue_handler),
            )
            .route(
                paths::GENERATE_GRADED_TEXT,
                axum::routing::get(generate_graded_text_handler),
            )
            .route(paths::HEALTH, axum::routing::get(health_handler))
            .with_state(Arc::new(self))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    async fn forward(&self, path_and_query: &str, request_id: RequestId) -> ProxyResult<Bytes> {
        let config = self
            .upstream
            .as_ref()
            .ok_or(ProxyError::ConfigurationMissing)?;

        self.client.get(config, path_and_query, request_id).await
    }
}

#[derive(Debug, Deserialize)]
struct WordsParams {
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateParams {
    complexity: Option<String>,
}

/// Correlation ID for log lines, taken from the request-id middleware
fn correlation_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .map(RequestId::from)
        .unwrap_or_default()
}

/// Relay an upstream 2xx body verbatim as JSON
fn relay_json(body: Bytes) -> Response {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, CONTENT_TYPE_JSON)],
        Body::from(body),
    )
        .into_response()
}

/// Collapse a proxy failure to the route's JSON 500, logging the real cause
fn failure_response(err: &ProxyError, generic_message: &str, request_id: RequestId) -> Response {
    error!(%request_id, error = %err, "proxy request failed");
    ErrorBody::for_failure(err, generic_message).into_response()
}

/// Word-listing route: `GET /api/hsk-words/{level}?page&limit`
async fn words_handler(
    State(proxy): State<Arc<ProxyService>>,
    Path(level): Path<String>,
    Query(params): Query<WordsParams>,
    headers: HeaderMap,
) -> Response {
    let request_id = correlation_id(&headers);
    let page = params.page.as_deref().unwrap_or(defaults::PAGE);
    let limit = params.limit.as_deref().unwrap_or(defaults::LIMIT);

    let upstream_path = format!(
        "/api/hsk-sources/{}/words?page={}&limit={}",
        urlencoding::encode(&level),
        urlencoding::encode(page),
        urlencoding::encode(limit),
    );

    match proxy.forward(&upstream_path, request_id).await {
        Ok(body) => {
            let mut response = relay_json(body);
            response.headers_mut().insert(
                CACHE_CONTROL,
                HeaderValue::from_static(WORDS_CACHE_CONTROL),
            );
            response
        }
        Err(err) => failure_response(&err, messages::FETCH_WORDS, request_id),
    }
}

/// Dialogue generation route: `GET /api/hsk-sources/{level}/generate-dialogue?complexity`
///
/// No cache directive: repeated calls produce different creative output.
async fn generate_dialogue_handler(
    State(proxy): State<Arc<ProxyService>>,
    Path(level): Path<String>,
    Query(params): Query<GenerateParams>,
    headers: HeaderMap,
) -> Response {
    let request_id = correlation_id(&headers);
    let complexity = params.complexity.as_deref().unwrap_or(defaults::COMPLEXITY);

    let upstream_path = format!(
        "/api/hsk-sources/{}/generate-dialogue?complexity={}",
        urlencoding::encode(&level),
        urlencoding::encode(complexity),
    );

    match proxy.forward(&upstream_path, request_id).await {
        Ok(body) => relay_json(body),
        Err(err) => failure_response(&err, messages::GENERATE_DIALOGUE, request_id),
    }
}

/// Graded-text generation route: `GET /api/hsk-sources/{level}/generate-graded-text?complexity`
async fn generate_graded_text_handler(
    State(proxy): State<Arc<ProxyService>>,
    Path(level): Path<String>,
    Query(params): Query<GenerateParams>,
    headers: HeaderMap,
) -> Response {
    let request_id = correlation_id(&headers);
    let complexity = params.complexity.as_deref().unwrap_or(defaults::COMPLEXITY);

    let upstream_path = format!(
        "/api/hsk-sources/{}/generate-graded-text?complexity={}",
        urlencoding::encode(&level),
        urlencoding::encode(complexity),
    );

    match proxy.forward(&upstream_path, request_id).await {
        Ok(body) => relay_json(body),
        Err(err) => failure_response(&err, messages::GENERATE_GRADED_TEXT, request_id),
    }
}

/// Health check handler
async fn health_handler() -> &'static str {
    "OK"
}
