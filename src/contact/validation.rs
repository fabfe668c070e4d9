//! Contact form validation.

use lettre::Address;
use thiserror::Error;

use super::types::{ContactRequest, Inquiry, DEFAULT_NAME, DEFAULT_SUBJECT, MAX_MESSAGE_LENGTH};

/// Validation errors for contact submissions.
///
/// The display text is shown to the submitter as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email or message is missing or blank.
    #[error("Email and message are required.")]
    MissingFields,

    /// Email does not look like an address.
    #[error("Please provide a valid email address.")]
    InvalidEmail,

    /// Message exceeds the maximum length.
    #[error("Message is too long. Please limit to {MAX_MESSAGE_LENGTH} characters.")]
    MessageTooLong,
}

/// Validate a contact payload and apply defaults.
///
/// Checks, in order:
/// - `email` and `message` are present and not blank
/// - `email` has the shape `local@domain.tld`
/// - `message` is at most 5000 characters
///
/// A blank `name` or `subject` falls back to "Anonymous" / "General Inquiry".
///
/// # Examples
///
/// ```
/// use bonsai_api::contact::{validate_inquiry, ContactRequest};
///
/// let inquiry = validate_inquiry(ContactRequest::new("a@example.com", "Hi")).unwrap();
/// assert_eq!(inquiry.name, "Anonymous");
/// assert_eq!(inquiry.subject, "General Inquiry");
///
/// assert!(validate_inquiry(ContactRequest::new("nope", "Hi")).is_err());
/// ```
pub fn validate_inquiry(request: ContactRequest) -> Result<Inquiry, ValidationError> {
    let (Some(email), Some(message)) = (non_blank(request.email), non_blank(request.message))
    else {
        return Err(ValidationError::MissingFields);
    };

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::MessageTooLong);
    }

    Ok(Inquiry {
        name: header_text(request.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        email,
        subject: header_text(request.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        message,
    })
}

/// Address format check.
///
/// Accepts exactly one `@`, no whitespace anywhere, a non-empty local part
/// and a domain with a dot that has at least one character on each side.
/// The address must also be accepted by the SMTP layer, so anything that
/// passes here can be used as a Reply-To.
///
/// # Examples
///
/// ```
/// use bonsai_api::contact::is_valid_email;
///
/// assert!(is_valid_email("member@bonsaiclubofsc.com"));
/// assert!(!is_valid_email("member@localhost"));
/// assert!(!is_valid_email("two@@example.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    dotted && email.parse::<Address>().is_ok()
}

/// Keep a value only if it has non-whitespace content.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reduce an optional field to a single trimmed line suitable for a mail header.
fn header_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| {
            v.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|v| !v.is_empty())
}
