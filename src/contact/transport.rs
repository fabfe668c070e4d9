//! Mail transports.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use super::message::OutgoingMail;

/// Port that selects implicit TLS (SMTPS).
const SMTPS_PORT: u16 = 465;

/// Errors raised by a mail transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// An address could not be parsed.
    #[error("invalid address: {0}")]
    Address(String),

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The SMTP server rejected the message or could not be reached.
    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Something that can deliver a composed mail.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand the mail to the transport. `Ok` means it was accepted for delivery.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError>;
}

/// SMTP transport backed by lettre.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build a transport for `host:port` with the given credentials.
    ///
    /// Port 465 uses implicit TLS; any other port upgrades with STARTTLS when
    /// the server offers it.
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let builder = if port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| TransportError::Smtp(e.to_string()))?
        } else {
            let tls = TlsParameters::new(host.to_string())
                .map_err(|e| TransportError::Smtp(e.to_string()))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .tls(Tls::Opportunistic(tls))
        };

        let mailer = builder
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .timeout(Some(timeout))
            .build();

        Ok(Self { mailer })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        let message = build_message(mail)?;
        self.mailer
            .send(message)
            .await
            .map_err(|e| TransportError::Smtp(e.to_string()))?;
        Ok(())
    }
}

/// Convert a composed mail into a MIME message with plain-text and HTML parts.
pub(crate) fn build_message(mail: &OutgoingMail) -> Result<Message, TransportError> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|e| TransportError::Address(format!("from {}: {e}", mail.from)))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| TransportError::Address(format!("to {}: {e}", mail.to)))?;
    let reply_to_address: Address = mail
        .reply_to
        .parse()
        .map_err(|e| TransportError::Address(format!("reply-to {}: {e}", mail.reply_to)))?;
    let reply_to = Mailbox::new(Some(mail.reply_to_name.clone()), reply_to_address);

    Message::builder()
        .from(from)
        .to(to)
        .reply_to(reply_to)
        .subject(mail.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            mail.text.clone(),
            mail.html.clone(),
        ))
        .map_err(|e| TransportError::Build(e.to_string()))
}
