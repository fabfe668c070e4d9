//! Test helpers for web API and client tests.
//!
//! Provides stub mail transports and helpers to build a router or a live
//! server around them.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use tokio::sync::Notify;

use bonsai_api::config::{MailConfig, SiteConfig, WebConfig};
use bonsai_api::contact::{MailDispatcher, MailTransport, OutgoingMail, TransportError};
use bonsai_api::web::{create_router, AppState, WebServer};

/// Transport stub that records every mail it is given.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingTransport {
    /// Mails handed to the transport so far.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Transport stub whose server always rejects the message.
pub struct FailingTransport;

/// Detail carried by [`FailingTransport`] errors; must never reach a client.
pub const FAILING_TRANSPORT_DETAIL: &str = "535 authentication failed for mailer@smtp.internal";

#[async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), TransportError> {
        Err(TransportError::Smtp(FAILING_TRANSPORT_DETAIL.to_string()))
    }
}

/// Transport stub that never answers.
pub struct StalledTransport;

#[async_trait]
impl MailTransport for StalledTransport {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), TransportError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Transport stub that holds each send until [`GatedTransport::open`] is called.
#[derive(Default)]
pub struct GatedTransport {
    gate: Notify,
}

impl GatedTransport {
    /// Let one pending send through.
    pub fn open(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl MailTransport for GatedTransport {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), TransportError> {
        self.gate.notified().await;
        Ok(())
    }
}

/// Create a test configuration.
pub fn create_test_config() -> WebConfig {
    WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..WebConfig::default()
    }
}

/// Dispatcher with no transport.
pub fn log_only_dispatcher() -> MailDispatcher {
    MailDispatcher::log_only(&MailConfig::default(), &SiteConfig::default())
}

/// Dispatcher around a stub transport.
pub fn dispatcher_with(transport: Arc<dyn MailTransport>) -> MailDispatcher {
    MailDispatcher::with_transport(&MailConfig::default(), &SiteConfig::default(), transport)
}

/// Create an in-process test server.
pub fn create_test_server(dispatcher: MailDispatcher) -> TestServer {
    create_test_server_with_config(dispatcher, &create_test_config())
}

/// Create an in-process test server with custom web configuration.
pub fn create_test_server_with_config(dispatcher: MailDispatcher, config: &WebConfig) -> TestServer {
    let app_state = Arc::new(AppState::new(dispatcher, SiteConfig::default()));
    let router = create_router(app_state, config);
    TestServer::new(router).expect("Failed to create test server")
}

/// Start a real server on a random port and return its API base URL.
pub async fn spawn_server(dispatcher: MailDispatcher) -> String {
    spawn_server_with_config(dispatcher, &create_test_config()).await
}

/// Start a real server with custom web configuration; `config.port` should be 0.
pub async fn spawn_server_with_config(dispatcher: MailDispatcher, config: &WebConfig) -> String {
    let state = AppState::new(dispatcher, SiteConfig::default());
    let server = WebServer::new(config, state).expect("Failed to create server");
    let addr: SocketAddr = server
        .run_with_addr()
        .await
        .expect("Failed to start server");
    format!("http://{addr}/api")
}
