//! Response DTOs for Web API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status reported for an accepted contact submission.
pub const RECEIVED_STATUS: &str = "received";

/// Acknowledgement shown to the person who submitted the form.
pub const THANK_YOU_MESSAGE: &str = "Thank you for your message. We will get back to you soon.";

/// Response to a contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Always `received` on success.
    pub status: String,
    /// Whether a live mail transport accepted the message.
    #[serde(default)]
    pub delivered: bool,
    /// Acknowledgement text.
    #[serde(default)]
    pub message: String,
}

impl ContactResponse {
    /// Successful submission.
    pub fn received(delivered: bool) -> Self {
        Self {
            status: RECEIVED_STATUS.to_string(),
            delivered,
            message: THANK_YOU_MESSAGE.to_string(),
        }
    }

    /// Whether the body reports an accepted submission.
    pub fn is_received(&self) -> bool {
        self.status == RECEIVED_STATUS
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Server time (RFC 3339).
    pub timestamp: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
}
