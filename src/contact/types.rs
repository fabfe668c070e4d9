//! Contact form types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length for the message body, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Name used when the sender leaves the name field empty.
pub const DEFAULT_NAME: &str = "Anonymous";

/// Subject used when the sender leaves the subject field empty.
pub const DEFAULT_SUBJECT: &str = "General Inquiry";

/// Contact form payload as submitted by the website.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation error instead of a JSON decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Sender name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sender email address (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Message subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Message body (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactRequest {
    /// Create a request with the required fields set.
    pub fn new(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Set the sender name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// A validated contact submission with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    /// Sender name, single line.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Subject, single line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryResult {
    /// True when a live transport accepted the message, false in log-only mode.
    pub delivered: bool,
}
