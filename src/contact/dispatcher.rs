//! Contact mail dispatcher.
//!
//! The dispatcher is built once at startup. With SMTP credentials it owns a
//! live transport for the lifetime of the process; without them it stays in
//! log-only mode and records each submission to the log instead.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::{MailConfig, SiteConfig, SmtpCredentials};
use crate::{BonsaiError, Result};

use super::message::{preview, OutgoingMail};
use super::transport::{MailTransport, SmtpMailTransport, TransportError};
use super::types::{DeliveryResult, Inquiry};

/// Errors raised while delivering a contact mail.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The transport refused the message.
    #[error("mail transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The transport did not answer in time.
    #[error("mail delivery timed out after {0:?}")]
    Timeout(Duration),
}

/// Delivers validated inquiries to the club inbox.
#[derive(Clone)]
pub struct MailDispatcher {
    transport: Option<Arc<dyn MailTransport>>,
    from: String,
    to: String,
    site: SiteConfig,
    send_timeout: Duration,
}

impl MailDispatcher {
    /// Build a dispatcher from configuration.
    ///
    /// Uses SMTP when host, user and password are all configured, log-only
    /// mode otherwise.
    pub fn from_config(mail: &MailConfig, site: &SiteConfig) -> Result<Self> {
        let Some(SmtpCredentials {
            host,
            user,
            password,
        }) = mail.smtp_credentials()
        else {
            return Ok(Self::log_only(mail, site));
        };

        let transport = SmtpMailTransport::new(
            host,
            mail.port,
            user,
            password,
            Duration::from_secs(mail.send_timeout_secs),
        )
        .map_err(|e| BonsaiError::Mail(e.to_string()))?;

        tracing::info!(host = %host, port = mail.port, "Mail dispatcher using SMTP");
        Ok(Self::with_transport(mail, site, Arc::new(transport)))
    }

    /// Build a dispatcher that only logs submissions.
    pub fn log_only(mail: &MailConfig, site: &SiteConfig) -> Self {
        tracing::warn!("Mail dispatcher running in log-only mode (SMTP not configured)");
        Self {
            transport: None,
            from: mail.from.clone(),
            to: mail.to.clone(),
            site: site.clone(),
            send_timeout: Duration::from_secs(mail.send_timeout_secs),
        }
    }

    /// Build a dispatcher around an existing transport.
    pub fn with_transport(
        mail: &MailConfig,
        site: &SiteConfig,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            transport: Some(transport),
            from: mail.from.clone(),
            to: mail.to.clone(),
            site: site.clone(),
            send_timeout: Duration::from_secs(mail.send_timeout_secs),
        }
    }

    /// Override the per-send timeout.
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Whether a live transport is attached.
    pub fn is_live(&self) -> bool {
        self.transport.is_some()
    }

    /// Address contact mails are sent to.
    pub fn recipient(&self) -> &str {
        &self.to
    }

    /// Compose and deliver a contact mail.
    ///
    /// In log-only mode the mail is written to the log and the result reports
    /// `delivered: false`; that is not an error. Each call is an independent
    /// attempt with no retry.
    pub async fn send(&self, inquiry: &Inquiry) -> std::result::Result<DeliveryResult, DeliveryError> {
        let mail = OutgoingMail::compose(inquiry, &self.from, &self.to, &self.site);

        let Some(transport) = &self.transport else {
            tracing::info!(
                to = %mail.to,
                subject = %mail.subject,
                from = %format!("{} <{}>", inquiry.name, inquiry.email),
                preview = %preview(&inquiry.message),
                "[log-only] contact mail not sent"
            );
            return Ok(DeliveryResult { delivered: false });
        };

        match tokio::time::timeout(self.send_timeout, transport.send(&mail)).await {
            Ok(Ok(())) => {
                tracing::info!(subject = %mail.subject, "Contact mail sent");
                Ok(DeliveryResult { delivered: true })
            }
            Ok(Err(e)) => Err(DeliveryError::Transport(e)),
            Err(_) => Err(DeliveryError::Timeout(self.send_timeout)),
        }
    }
}

impl fmt::Debug for MailDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailDispatcher")
            .field("live", &self.is_live())
            .field("from", &self.from)
            .field("to", &self.to)
            .field("send_timeout", &self.send_timeout)
            .finish()
    }
}
