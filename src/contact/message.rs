//! Contact mail composition.

use crate::config::SiteConfig;

use super::types::Inquiry;

/// Characters of the message shown in log-only output.
const PREVIEW_LENGTH: usize = 100;

/// A fully composed contact mail, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Sender address (the site's mailbox).
    pub from: String,
    /// Recipient address (the club's inbox).
    pub to: String,
    /// Display name of the person who filled in the form.
    pub reply_to_name: String,
    /// Address of the person who filled in the form.
    pub reply_to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

impl OutgoingMail {
    /// Compose the mail for a validated inquiry.
    pub fn compose(inquiry: &Inquiry, from: &str, to: &str, site: &SiteConfig) -> Self {
        let subject = format!(
            "[{} Contact] {} from {}",
            site.name, inquiry.subject, inquiry.name
        );

        Self {
            from: from.to_string(),
            to: to.to_string(),
            reply_to_name: inquiry.name.clone(),
            reply_to: inquiry.email.clone(),
            subject,
            text: render_text(inquiry, site),
            html: render_html(inquiry, site),
        }
    }
}

fn render_text(inquiry: &Inquiry, site: &SiteConfig) -> String {
    format!(
        "New contact form submission:\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Subject: {subject}\n\n\
         Message:\n{message}\n\n\
         ---\n\
         Sent from {domain} contact form",
        name = inquiry.name,
        email = inquiry.email,
        subject = inquiry.subject,
        message = inquiry.message,
        domain = site.domain,
    )
}

fn render_html(inquiry: &Inquiry, site: &SiteConfig) -> String {
    let message = escape_html(&inquiry.message)
        .replace("\r\n", "\n")
        .replace('\n', "<br>");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background: #166534; color: white; padding: 20px; border-radius: 8px 8px 0 0; }}
    .content {{ background: #f9f9f9; padding: 20px; border: 1px solid #ddd; }}
    .field {{ margin-bottom: 15px; }}
    .label {{ font-weight: bold; color: #166534; }}
    .message {{ background: white; padding: 15px; border-left: 3px solid #166534; margin-top: 15px; }}
    .footer {{ font-size: 12px; color: #666; margin-top: 20px; padding-top: 15px; border-top: 1px solid #ddd; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h2 style="margin: 0;">New Contact Form Submission</h2>
    </div>
    <div class="content">
      <div class="field">
        <span class="label">From:</span> {name} ({email})
      </div>
      <div class="field">
        <span class="label">Subject:</span> {subject}
      </div>
      <div class="message">
        <span class="label">Message:</span>
        <p>{message}</p>
      </div>
      <div class="footer">
        Sent from {domain} contact form
      </div>
    </div>
  </div>
</body>
</html>"#,
        name = escape_html(&inquiry.name),
        email = escape_html(&inquiry.email),
        subject = escape_html(&inquiry.subject),
        message = message,
        domain = escape_html(&site.domain),
    )
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First 100 characters of a message, with an ellipsis when truncated.
pub fn preview(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(PREVIEW_LENGTH).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
