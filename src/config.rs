//! Configuration module for the bonsai club API.

use serde::Deserialize;
use std::path::Path;

use lettre::message::Mailbox;
use crate::{BonsaiError, Result};

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Rate limit window in milliseconds.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_ms: u64,
    /// Maximum requests per client IP within one window.
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: u32,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    /// Seconds to wait for in-flight requests on shutdown before forcing exit.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
    /// Key rate limits on `X-Forwarded-For` / `X-Real-IP` instead of the
    /// socket peer. Enable only behind a reverse proxy that sets them.
    #[serde(default)]
    pub trust_proxy: bool,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_rate_limit_window() -> u64 {
    60 * 1000 // 1 minute
}

fn default_rate_limit_max() -> u32 {
    60
}

fn default_body_limit() -> usize {
    10 * 1024 // 10KB
}

fn default_shutdown_grace() -> u64 {
    10
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: default_cors_origins(),
            rate_limit_window_ms: default_rate_limit_window(),
            rate_limit_max: default_rate_limit_max(),
            body_limit_bytes: default_body_limit(),
            shutdown_grace_secs: default_shutdown_grace(),
            trust_proxy: false,
        }
    }
}

/// Outgoing mail (SMTP) configuration.
///
/// When any of `host`, `user` or `password` is missing the contact form runs
/// in log-only mode.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// SMTP server hostname.
    #[serde(default)]
    pub host: Option<String>,
    /// SMTP port. 465 selects implicit TLS, anything else STARTTLS when offered.
    #[serde(default = "default_mail_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub user: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address for contact mails.
    #[serde(default = "default_mail_from")]
    pub from: String,
    /// Recipient address for contact mails.
    #[serde(default = "default_mail_to")]
    pub to: String,
    /// Upper bound on a single SMTP send, in seconds.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

fn default_mail_port() -> u16 {
    587
}

fn default_mail_from() -> String {
    "noreply@bonsaiclubofsc.com".to_string()
}

fn default_mail_to() -> String {
    "info@bonsaiclubofsc.com".to_string()
}

fn default_send_timeout() -> u64 {
    30
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_mail_port(),
            user: None,
            password: None,
            from: default_mail_from(),
            to: default_mail_to(),
            send_timeout_secs: default_send_timeout(),
        }
    }
}

/// Host, user and password of a configured SMTP account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmtpCredentials<'a> {
    /// SMTP server hostname.
    pub host: &'a str,
    /// SMTP username.
    pub user: &'a str,
    /// SMTP password, untrimmed.
    pub password: &'a str,
}

impl MailConfig {
    /// SMTP account, if host, user and password are all present and non-blank.
    pub fn smtp_credentials(&self) -> Option<SmtpCredentials<'_>> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.trim().is_empty())
        }
        Some(SmtpCredentials {
            host: present(&self.host)?,
            user: present(&self.user)?,
            password: present(&self.password)?,
        })
    }

    /// Whether host, user and password are all present and non-blank.
    pub fn is_smtp_configured(&self) -> bool {
        self.smtp_credentials().is_some()
    }
}

/// Site information configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Club name, used in mail subjects.
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Public domain of the website, used in mail footers.
    #[serde(default = "default_site_domain")]
    pub domain: String,
    /// Service identifier reported by the health endpoint.
    #[serde(default = "default_site_service")]
    pub service: String,
}

fn default_site_name() -> String {
    "Bonsai Club".to_string()
}

fn default_site_domain() -> String {
    "bonsaiclubofsc.com".to_string()
}

fn default_site_service() -> String {
    "bonsaiclubofsc-api".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            domain: default_site_domain(),
            service: default_site_service(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty means console only.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Mail configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// Site information.
    #[serde(default)]
    pub site: SiteConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BonsaiError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BonsaiError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `HOST`, `PORT`: bind address
    /// - `ALLOWED_ORIGINS`: comma-separated CORS origins
    /// - `RATE_LIMIT_WINDOW_MS`, `RATE_LIMIT_MAX`, `TRUST_PROXY`: rate limiting
    /// - `MAIL_HOST`, `MAIL_PORT`, `MAIL_USER`, `MAIL_PASSWORD`, `MAIL_FROM`, `MAIL_TO`: SMTP
    /// - `LOG_LEVEL`: log level
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored, and numeric values that fail to parse keep
    /// the current setting.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(host) = get("HOST") {
            self.web.host = host;
        }
        if let Some(port) = get("PORT").and_then(|v| v.parse().ok()) {
            self.web.port = port;
        }
        if let Some(origins) = get("ALLOWED_ORIGINS") {
            let origins = parse_list(&origins);
            if !origins.is_empty() {
                self.web.cors_origins = origins;
            }
        }
        if let Some(window) = get("RATE_LIMIT_WINDOW_MS").and_then(|v| v.parse().ok()) {
            self.web.rate_limit_window_ms = window;
        }
        if let Some(max) = get("RATE_LIMIT_MAX").and_then(|v| v.parse().ok()) {
            self.web.rate_limit_max = max;
        }
        if let Some(trust) = get("TRUST_PROXY").and_then(|v| parse_flag(&v)) {
            self.web.trust_proxy = trust;
        }

        if let Some(host) = get("MAIL_HOST") {
            self.mail.host = Some(host);
        }
        if let Some(port) = get("MAIL_PORT").and_then(|v| v.parse().ok()) {
            self.mail.port = port;
        }
        if let Some(user) = get("MAIL_USER") {
            self.mail.user = Some(user);
        }
        // Passwords may legitimately carry surrounding whitespace.
        if let Some(password) = lookup("MAIL_PASSWORD").filter(|v| !v.is_empty()) {
            self.mail.password = Some(password);
        }
        if let Some(from) = get("MAIL_FROM") {
            self.mail.from = from;
        }
        if let Some(to) = get("MAIL_TO") {
            self.mail.to = to;
        }

        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The rate limit window or maximum is zero
    /// - The mail port is zero
    /// - The mail sender or recipient is not a valid address
    pub fn validate(&self) -> Result<()> {
        if self.web.rate_limit_window_ms == 0 {
            return Err(BonsaiError::Validation(
                "rate_limit_window_ms must be greater than zero".to_string(),
            ));
        }
        if self.web.rate_limit_max == 0 {
            return Err(BonsaiError::Validation(
                "rate_limit_max must be greater than zero".to_string(),
            ));
        }
        if self.mail.port == 0 {
            return Err(BonsaiError::Validation(
                "mail port must be greater than zero".to_string(),
            ));
        }
        for (key, value) in [("mail.from", &self.mail.from), ("mail.to", &self.mail.to)] {
            if let Err(e) = value.parse::<Mailbox>() {
                return Err(BonsaiError::Validation(format!(
                    "{key} is not a valid address: {value} ({e})"
                )));
            }
        }
        Ok(())
    }
}

/// Parse a boolean switch such as `true`, `1`, `yes` or `off`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a comma-separated list, dropping empty items.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
