//! Configuration module for the mail relay.
//!
//! Configuration is read once at startup from a TOML file and then
//! overridden by environment variables. Provider credentials live here so
//! the transport factory never touches the process environment.

use serde::Deserialize;
use std::path::Path;

use crate::mail::is_valid_email;
use crate::{RelayError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
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
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
            format: LogFormat::default(),
        }
    }
}

/// Mail handling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Sender used when a request does not name one.
    #[serde(default)]
    pub default_from: String,
    /// Maximum number of recipients per bulk request.
    #[serde(default = "default_max_bulk_recipients")]
    pub max_bulk_recipients: usize,
    /// Whether raw transport error messages are returned to callers.
    #[serde(default = "default_expose_transport_errors")]
    pub expose_transport_errors: bool,
}

fn default_max_bulk_recipients() -> usize {
    50
}

fn default_expose_transport_errors() -> bool {
    true
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            default_from: String::new(),
            max_bulk_recipients: default_max_bulk_recipients(),
            expose_transport_errors: default_expose_transport_errors(),
        }
    }
}

/// Rate limit applied to the send endpoints, per client IP.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// How often idle limiter entries are dropped, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    900 // 15 minutes
}

fn default_cleanup_interval() -> u64 {
    300
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

/// Web layer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Serve Swagger UI and the OpenAPI document.
    #[serde(default = "default_enable_docs")]
    pub enable_docs: bool,
}

fn default_enable_docs() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            enable_docs: default_enable_docs(),
        }
    }
}

/// Login for a hosted mail provider.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AccountConfig {
    /// Account user name (usually the mailbox address).
    #[serde(default)]
    pub user: String,
    /// Account password or app password.
    #[serde(default)]
    pub password: String,
}

/// Generic SMTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpServerConfig {
    /// Server hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// Server port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Implicit TLS on connect. When false, STARTTLS is used if offered.
    #[serde(default)]
    pub secure: bool,
    /// Login user name.
    #[serde(default)]
    pub user: String,
    /// Login password.
    #[serde(default)]
    pub password: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for SmtpServerConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            secure: false,
            user: String::new(),
            password: String::new(),
        }
    }
}

/// Credentials for every supported provider.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProvidersConfig {
    /// Gmail account.
    #[serde(default)]
    pub gmail: AccountConfig,
    /// Outlook account.
    #[serde(default)]
    pub outlook: AccountConfig,
    /// Arbitrary SMTP server.
    #[serde(default)]
    pub smtp: SmtpServerConfig,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Mail handling configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// Rate limit configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Web layer configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Provider credentials.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `HOST`, `PORT`
    /// - `LOG_LEVEL`
    /// - `DEFAULT_FROM_EMAIL`
    /// - `GMAIL_USER`, `GMAIL_APP_PASSWORD`
    /// - `OUTLOOK_USER`, `OUTLOOK_PASSWORD`
    /// - `SMTP_HOST`, `SMTP_PORT`, `SMTP_SECURE`, `SMTP_USER`, `SMTP_PASSWORD`
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = parse_port("PORT", &port)?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(from) = var("DEFAULT_FROM_EMAIL") {
            self.mail.default_from = from;
        }

        let providers = &mut self.providers;
        if let Some(user) = var("GMAIL_USER") {
            providers.gmail.user = user;
        }
        if let Some(password) = var("GMAIL_APP_PASSWORD") {
            providers.gmail.password = password;
        }
        if let Some(user) = var("OUTLOOK_USER") {
            providers.outlook.user = user;
        }
        if let Some(password) = var("OUTLOOK_PASSWORD") {
            providers.outlook.password = password;
        }
        if let Some(host) = var("SMTP_HOST") {
            providers.smtp.host = host;
        }
        if let Some(port) = var("SMTP_PORT") {
            providers.smtp.port = parse_port("SMTP_PORT", &port)?;
        }
        if let Some(secure) = var("SMTP_SECURE") {
            providers.smtp.secure = secure == "true";
        }
        if let Some(user) = var("SMTP_USER") {
            providers.smtp.user = user;
        }
        if let Some(password) = var("SMTP_PASSWORD") {
            providers.smtp.password = password;
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(RelayError::Config("server.port must not be 0".to_string()));
        }
        if self.mail.max_bulk_recipients == 0 {
            return Err(RelayError::Config(
                "mail.max_bulk_recipients must be at least 1".to_string(),
            ));
        }
        if !self.mail.default_from.is_empty() && !is_valid_email(&self.mail.default_from) {
            return Err(RelayError::Config(format!(
                "mail.default_from is not a valid address: {}",
                self.mail.default_from
            )));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0 {
            return Err(RelayError::Config(
                "rate_limit.max_requests and rate_limit.window_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .parse()
        .map_err(|_| RelayError::Config(format!("{key} must be a valid port number, got {value:?}")))
}
