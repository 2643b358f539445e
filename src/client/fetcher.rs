//! JSON fetch primitive used by the cache and generation client
//!
//! No retries here: retry policy belongs to the layers above. The only side
//! effect is the network call itself.

use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::{Request, Uri};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure taxonomy for a single fetch attempt
///
/// `Clone` so outcomes can be shared across single-flight joiners and kept
/// in cache entries; sources are flattened to messages for that reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// DNS/connection failure before any HTTP status was obtained
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// The body was not the expected JSON envelope
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Seam over the raw GET so the cache can be tested with scripted doubles
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// GET the URL and return the raw body of a 2xx response
    async fn fetch_raw(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// Parse a fetched body as the expected envelope type
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    url: &str,
) -> Result<T, FetchError> {
    let body = fetcher.fetch_raw(url).await?;
    serde_json::from_slice(&body).map_err(|e| FetchError::MalformedResponse(e.to_string()))
}

/// Production fetcher over the shared hyper connection pool
#[derive(Clone)]
pub struct HttpFetcher {
    client: hyper_util::client::legacy::Client<
        hyper_util::client::legacy::connect::HttpConnector,
        Body,
    >,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client =
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build_http();

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_raw(&self, url: &str) -> Result<Bytes, FetchError> {
        let uri: Uri = url
            .parse()
            .map_err(|_| FetchError::Transport(format!("invalid URL: {url}")))?;

        let request = Request::get(uri)
            .body(Body::empty())
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(body.to_bytes())
    }
}
