//! End-to-end tests for the proxy routes against a mock upstream

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

use hsk_gateway::proxy::types::{ApiHost, ApiKey};
use hsk_gateway::proxy::{ProxyService, UpstreamConfig};

fn upstream_config(url: &str) -> UpstreamConfig {
    UpstreamConfig {
        api_host: ApiHost::try_new(url.to_string()).unwrap(),
        api_key: ApiKey::try_new("server-side-secret".to_string()).unwrap(),
    }
}

fn router_for(url: &str) -> axum::Router {
    ProxyService::new(Some(upstream_config(url))).into_router()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[rstest]
#[case("/api/hsk-words/1")]
#[case("/api/hsk-sources/1/generate-dialogue")]
#[case("/api/hsk-sources/1/generate-graded-text")]
#[tokio::test]
async fn unconfigured_upstream_answers_500_without_any_upstream_call(#[case] uri: &str) {
    let app = ProxyService::new(None).into_router();

    let response = app.oneshot(get(uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "API configuration missing" }));
}

#[tokio::test]
async fn words_route_relays_upstream_body_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let upstream_body = r#"{"data":{"list":[{"id":1,"hanzi":"你","pinyin":"nǐ","english_translation":"you","indonesian_translation":"kamu","example":{"hanzi":"你好","pinyin":"nǐ hǎo","english":"hello","indonesian":"halo"}}],"total":600},"success":true}"#;
    let mock = server
        .mock("GET", "/api/hsk-sources/2/words?page=3&limit=50")
        .match_header("authorization", "Bearer server-side-secret")
        .with_status(200)
        .with_body(upstream_body)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app
        .oneshot(get("/api/hsk-words/2?page=3&limit=50"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), upstream_body.as_bytes());
}

#[tokio::test]
async fn words_route_defaults_page_and_limit() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hsk-sources/1/words?page=1&limit=200")
        .with_status(200)
        .with_body(r#"{"data":{"list":[],"total":0},"success":true}"#)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app.oneshot(get("/api/hsk-words/1")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn words_route_forwards_level_untouched() {
    // Range policy belongs to the upstream; even a bogus level is forwarded
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hsk-sources/99/words?page=1&limit=200")
        .with_status(200)
        .with_body(r#"{"data":{"list":[],"total":0},"success":true}"#)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app.oneshot(get("/api/hsk-words/99")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn words_route_sets_shared_cache_directive() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/hsk-sources/1/words?page=1&limit=200")
        .with_status(200)
        .with_body(r#"{"data":{"list":[],"total":0},"success":true}"#)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app.oneshot(get("/api/hsk-words/1")).await.unwrap();

    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, s-maxage=3600, stale-while-revalidate=86400"
    );
}

#[tokio::test]
async fn generation_routes_set_no_cache_directive() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/hsk-sources/1/generate-dialogue?complexity=2")
        .with_status(200)
        .with_body(r#"{"data":{"dialogue":[],"pinyin":[],"english":[],"error":null},"success":true}"#)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app
        .oneshot(get("/api/hsk-sources/1/generate-dialogue?complexity=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn generation_route_defaults_complexity() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hsk-sources/3/generate-graded-text?complexity=1")
        .with_status(200)
        .with_body(r#"{"data":{"title":"","line_details":[],"english":[],"error":null},"success":true}"#)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app
        .oneshot(get("/api/hsk-sources/3/generate-graded-text"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn upstream_503_collapses_to_words_500() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/hsk-sources/1/words?page=1&limit=200")
        .with_status(503)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app.oneshot(get("/api/hsk-words/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Failed to fetch HSK words" }));
}

#[rstest]
#[case(
    "/api/hsk-sources/1/generate-dialogue",
    "/api/hsk-sources/1/generate-dialogue?complexity=1",
    "Failed to generate dialogue"
)]
#[case(
    "/api/hsk-sources/1/generate-graded-text",
    "/api/hsk-sources/1/generate-graded-text?complexity=1",
    "Failed to generate graded text"
)]
#[tokio::test]
async fn upstream_failure_collapses_to_generation_500(
    #[case] client_uri: &str,
    #[case] upstream_path: &str,
    #[case] message: &str,
) {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", upstream_path)
        .with_status(404)
        .create_async()
        .await;

    let app = router_for(&server.url());
    let response = app.oneshot(get(client_uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": message }));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = ProxyService::new(None).into_router();
    let response = app.oneshot(get("/api/hsk-words/1")).await.unwrap();

    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let app = ProxyService::new(None).into_router();
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), b"OK");
}
