//! Contact form pipeline.
//!
//! This module turns a raw contact-form payload into an email for the club:
//! - Payload validation and normalization
//! - Mail composition (plain text and HTML)
//! - Delivery over SMTP, or log-only mode when SMTP is not configured

mod dispatcher;
mod message;
mod transport;
mod types;
mod validation;

pub use dispatcher::{DeliveryError, MailDispatcher};
pub use message::{escape_html, preview, OutgoingMail};
pub use transport::{MailTransport, SmtpMailTransport, TransportError};
pub use types::{
    ContactRequest, DeliveryResult, Inquiry, DEFAULT_NAME, DEFAULT_SUBJECT, MAX_MESSAGE_LENGTH,
};
pub use validation::{is_valid_email, validate_inquiry, ValidationError};
