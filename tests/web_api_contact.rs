//! Web API Contact Tests
//!
//! Integration tests for the contact form endpoints.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

use bonsai_api::contact::MAX_MESSAGE_LENGTH;

use common::{
    create_test_server, dispatcher_with, log_only_dispatcher, FailingTransport,
    RecordingTransport, StalledTransport, FAILING_TRANSPORT_DETAIL,
};

const THANK_YOU: &str = "Thank you for your message. We will get back to you soon.";
const GENERIC_FAILURE: &str = "Unable to process your message. Please try again later.";

fn valid_payload() -> Value {
    json!({
        "name": "Alex Morgan",
        "email": "alex@example.com",
        "subject": "Membership",
        "message": "How do I join the club?"
    })
}

#[tokio::test]
async fn test_contact_log_only_reports_not_delivered() {
    let server = create_test_server(log_only_dispatcher());

    let response = server.post("/api/contact").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "received");
    assert_eq!(body["delivered"], false);
    assert_eq!(body["message"], THANK_YOU);
}

#[tokio::test]
async fn test_contact_live_transport_delivers_once() {
    let transport = Arc::new(RecordingTransport::default());
    let server = create_test_server(dispatcher_with(transport.clone()));

    let response = server.post("/api/contact").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "received");
    assert_eq!(body["delivered"], true);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply_to, "alex@example.com");
    assert_eq!(sent[0].reply_to_name, "Alex Morgan");
    assert_eq!(sent[0].subject, "[Bonsai Club Contact] Membership from Alex Morgan");
}

#[tokio::test]
async fn test_contact_defaults_applied() {
    let transport = Arc::new(RecordingTransport::default());
    let server = create_test_server(dispatcher_with(transport.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({ "email": "sam@example.org", "message": "Hi" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].subject,
        "[Bonsai Club Contact] General Inquiry from Anonymous"
    );
}

#[tokio::test]
async fn test_contact_missing_fields_rejected_without_dispatch() {
    let transport = Arc::new(RecordingTransport::default());
    let server = create_test_server(dispatcher_with(transport.clone()));

    let payloads = [
        json!({ "name": "Alex", "message": "Hello" }),
        json!({ "name": "Alex", "email": "alex@example.com" }),
        json!({}),
        json!({ "email": "   ", "message": "Hello" }),
    ];

    for payload in payloads {
        let response = server.post("/api/contact").json(&payload).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Email and message are required.");
    }

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_contact_invalid_email_rejected() {
    let transport = Arc::new(RecordingTransport::default());
    let server = create_test_server(dispatcher_with(transport.clone()));

    let emails = [
        "alex",
        "alex@example",
        "alex@@example.com",
        "a b@example.com",
        "@example.com",
        "alex@example..com",
        "alex<x@example.com",
    ];
    for email in emails {
        let response = server
            .post("/api/contact")
            .json(&json!({ "email": email, "message": "Hello" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "email {email}");
        let body: Value = response.json();
        assert_eq!(body["error"], "Please provide a valid email address.");
    }

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_contact_message_too_long_rejected() {
    let transport = Arc::new(RecordingTransport::default());
    let server = create_test_server(dispatcher_with(transport.clone()));

    let message = "a".repeat(MAX_MESSAGE_LENGTH + 1);
    let response = server
        .post("/api/contact")
        .json(&json!({ "email": "alex@example.com", "message": message }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Message is too long. Please limit to 5000 characters."
    );
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_contact_message_at_limit_accepted() {
    let server = create_test_server(log_only_dispatcher());

    let response = server
        .post("/api/contact")
        .json(&json!({ "email": "alex@example.com", "message": "a".repeat(MAX_MESSAGE_LENGTH) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_contact_transport_failure_is_generic_500() {
    let server = create_test_server(dispatcher_with(Arc::new(FailingTransport)));

    let response = server.post("/api/contact").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text();
    assert!(!text.contains(FAILING_TRANSPORT_DETAIL));
    assert!(!text.contains("535"));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body, json!({ "error": GENERIC_FAILURE }));
}

#[tokio::test]
async fn test_contact_transport_timeout_is_500() {
    let dispatcher = dispatcher_with(Arc::new(StalledTransport))
        .with_send_timeout(Duration::from_millis(100));
    let server = create_test_server(dispatcher);

    let response = server.post("/api/contact").json(&valid_payload()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], GENERIC_FAILURE);
}

#[tokio::test]
async fn test_inquiry_alias_uses_same_rules() {
    let transport = Arc::new(RecordingTransport::default());
    let server = create_test_server(dispatcher_with(transport.clone()));

    let response = server.post("/api/inquiry").json(&valid_payload()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "received");
    assert_eq!(body["delivered"], true);

    let response = server
        .post("/api/inquiry")
        .json(&json!({ "email": "alex@example.com", "message": "a".repeat(MAX_MESSAGE_LENGTH + 1) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn test_contact_malformed_json_is_400() {
    let server = create_test_server(log_only_dispatcher());

    let response = server
        .post("/api/contact")
        .text("{\"email\": \"alex@example.com\", ")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid JSON payload");
}

#[tokio::test]
async fn test_contact_wrong_content_type_is_400() {
    let server = create_test_server(log_only_dispatcher());

    let response = server
        .post("/api/contact")
        .text("email=alex@example.com&message=hi")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_contact_body_over_limit_is_413() {
    let transport = Arc::new(RecordingTransport::default());
    let server = create_test_server(dispatcher_with(transport.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({ "email": "alex@example.com", "message": "x".repeat(20_000) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert!(transport.sent().is_empty());
}
