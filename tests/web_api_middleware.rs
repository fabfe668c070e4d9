//! Web API Middleware Tests
//!
//! Integration tests for CORS, origin checks, rate limiting, security headers
//! and compression on the full router.

mod common;

use axum::http::header::{ACCEPT_ENCODING, ORIGIN};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::Value;

use bonsai_api::config::WebConfig;
use bonsai_api::web::middleware::HARDENING_HEADERS;

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

use common::{
    create_test_config, create_test_server, create_test_server_with_config, log_only_dispatcher,
    spawn_server_with_config,
};

#[tokio::test]
async fn test_listed_origin_gets_cors_headers() {
    let server = create_test_server(log_only_dispatcher());

    let response = server
        .get("/api/events")
        .add_header(ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("access-control-allow-origin"),
        "http://localhost:5173"
    );
    assert_eq!(response.header("access-control-allow-credentials"), "true");
}

#[tokio::test]
async fn test_unlisted_origin_forbidden() {
    let server = create_test_server(log_only_dispatcher());

    let response = server
        .post("/api/contact")
        .add_header(ORIGIN, HeaderValue::from_static("https://spam.example"))
        .json(&serde_json::json!({ "email": "a@b.co", "message": "hi" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "Origin not allowed");
}

#[tokio::test]
async fn test_request_without_origin_allowed() {
    let server = create_test_server(log_only_dispatcher());

    let response = server.get("/api/resources").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_configured_origins_replace_defaults() {
    let config = WebConfig {
        cors_origins: vec!["https://bonsaiclubofsc.com".to_string()],
        ..create_test_config()
    };
    let server = create_test_server_with_config(log_only_dispatcher(), &config);

    let response = server
        .get("/api/health")
        .add_header(ORIGIN, HeaderValue::from_static("https://bonsaiclubofsc.com"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get("/api/health")
        .add_header(ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rate_limit_exceeded() {
    let config = WebConfig {
        rate_limit_max: 3,
        ..create_test_config()
    };
    let server = create_test_server_with_config(log_only_dispatcher(), &config);

    for _ in 0..3 {
        let response = server.get("/api/events").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let response = server.get("/api/events").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["error"], "Too many requests, please try again later.");
}

#[tokio::test]
async fn test_rate_limit_ignores_spoofed_forwarded_for() {
    let config = WebConfig {
        rate_limit_max: 2,
        ..create_test_config()
    };
    let base = spawn_server_with_config(log_only_dispatcher(), &config).await;
    let client = reqwest::Client::new();

    let mut statuses = Vec::new();
    for i in 0..5 {
        let response = client
            .get(format!("{base}/health"))
            .header(X_FORWARDED_FOR, format!("10.0.0.{i}"))
            .send()
            .await
            .unwrap();
        statuses.push(response.status().as_u16());
    }

    assert_eq!(statuses, vec![200, 200, 429, 429, 429]);
}

#[tokio::test]
async fn test_rate_limit_is_per_client_behind_trusted_proxy() {
    let config = WebConfig {
        rate_limit_max: 1,
        trust_proxy: true,
        ..create_test_config()
    };
    let server = create_test_server_with_config(log_only_dispatcher(), &config);

    let first = server
        .get("/api/health")
        .add_header(X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.1"))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = server
        .get("/api/health")
        .add_header(X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.2"))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);

    let repeat = server
        .get("/api/health")
        .add_header(X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.1"))
        .await;
    assert_eq!(repeat.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_security_headers_present() {
    let server = create_test_server(log_only_dispatcher());

    let response = server.get("/api/health").await;
    for &(name, value) in HARDENING_HEADERS {
        assert_eq!(response.header(name), value, "{name}");
    }
    assert_eq!(response.header("x-frame-options"), "SAMEORIGIN");
    assert_eq!(response.header("referrer-policy"), "no-referrer");
    assert!(response.headers().get("cache-control").is_none());

    // Error responses carry them too.
    let response = server.get("/api/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.header("x-content-type-options"), "nosniff");
}

#[tokio::test]
async fn test_gzip_compression() {
    let server = create_test_server(log_only_dispatcher());

    let response = server
        .get("/api/resources")
        .add_header(ACCEPT_ENCODING, HeaderValue::from_static("gzip"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-encoding"), "gzip");
}
