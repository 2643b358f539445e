//! Upstream leg of the proxy: authenticated GETs against the private API

use axum::body::Body;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::{Request, Uri};
use std::time::Duration;
use tracing::debug;

use crate::proxy::headers::{AUTHORIZATION, BEARER_PREFIX, CONTENT_TYPE, CONTENT_TYPE_JSON};
use crate::proxy::types::{ProxyError, ProxyResult, RequestId, UpstreamConfig};

/// Default guard against a hung upstream call
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin client around the shared hyper connection pool
///
/// Injects the bearer credential and content type on every request; the
/// credential never appears in any relayed response or log line.
#[derive(Clone)]
pub struct UpstreamClient {
    client: hyper_util::client::legacy::Client<
        hyper_util::client::legacy::connect::HttpConnector,
        Body,
    >,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Self {
        let client =
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build_http();

        Self { client, timeout }
    }

    /// GET `{api_host}{path_and_query}` with the configured credential and
    /// return the raw response body for verbatim relay.
    pub async fn get(
        &self,
        config: &UpstreamConfig,
        path_and_query: &str,
        request_id: RequestId,
    ) -> ProxyResult<Bytes> {
        let url = format!("{}{}", config.api_host.as_ref(), path_and_query);
        let uri: Uri = url
            .parse()
            .map_err(|_| ProxyError::InvalidUpstreamUrl(url.clone()))?;

        let request = Request::get(uri)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(
                AUTHORIZATION,
                format!("{BEARER_PREFIX}{}", config.api_key.as_ref()),
            )
            .body(Body::empty())?;

        debug!(%request_id, path = path_and_query, "forwarding to upstream");

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| ProxyError::Timeout(self.timeout))?
            .map_err(|e| ProxyError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ProxyError::Body(e.to_string()))?;

        Ok(body.to_bytes())
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new(DEFAULT_UPSTREAM_TIMEOUT)
    }
}
