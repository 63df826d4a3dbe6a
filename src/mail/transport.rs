//! SMTP transports for the supported providers.
//!
//! A [`TransportFactory`] turns a [`Provider`] into a ready-to-use
//! [`Mailer`]. The production factory builds a `lettre` SMTP client from the
//! provider credentials captured in [`ProvidersConfig`] at startup.

use async_trait::async_trait;
use lettre::{
    message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        response::Response,
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use uuid::Uuid;

use super::types::{OutgoingEmail, SendReceipt};
use crate::config::ProvidersConfig;

const GMAIL_HOST: &str = "smtp.gmail.com";
const OUTLOOK_HOST: &str = "smtp-mail.outlook.com";

/// Mail building or delivery errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// An address could not be parsed.
    #[error("invalid address: {0}")]
    Address(String),

    /// The MIME message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// An attachment is malformed.
    #[error("invalid attachment: {0}")]
    Attachment(String),

    /// Connecting, authenticating or submitting failed.
    #[error("transport error: {0}")]
    Transport(String),
}

impl MailError {
    /// The underlying message, without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            MailError::Address(d)
            | MailError::Build(d)
            | MailError::Attachment(d)
            | MailError::Transport(d) => d,
        }
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        MailError::Transport(e.to_string())
    }
}

/// Mail provider profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// Gmail, implicit TLS on port 465.
    #[default]
    Gmail,
    /// Outlook, STARTTLS on port 587.
    Outlook,
    /// Any SMTP server.
    Smtp,
}

impl Provider {
    /// Resolve a service name. Unknown or absent names select Gmail.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("outlook") => Provider::Outlook,
            Some("smtp") => Provider::Smtp,
            _ => Provider::Gmail,
        }
    }

    /// Service name as used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gmail => "gmail",
            Provider::Outlook => "outlook",
            Provider::Smtp => "smtp",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connected-on-demand client able to deliver messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailError>;
}

/// Builds a [`Mailer`] for a provider.
pub trait TransportFactory: Send + Sync {
    /// Build a fresh client. Nothing is contacted until the first send.
    fn create(&self, provider: Provider) -> Result<Box<dyn Mailer>, MailError>;
}

/// How the SMTP session is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// TLS from the first byte (SMTPS).
    Implicit,
    /// Plain connect, STARTTLS required.
    StartTls,
    /// Plain connect, STARTTLS when the server offers it.
    Opportunistic,
}

/// Everything needed to build a client for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Session security.
    pub tls: TlsMode,
    /// User and password, present only when both are non-empty.
    pub credentials: Option<(String, String)>,
    /// Sender used when a message names none.
    pub default_sender: Option<String>,
}

impl ConnectionProfile {
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let builder = match self.tls {
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?,
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?,
            TlsMode::Opportunistic => {
                let tls = TlsParameters::new(self.host.clone())?;
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host)
                    .tls(Tls::Opportunistic(tls))
            }
        };
        let builder = builder.port(self.port);

        let builder = match &self.credentials {
            Some((user, password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            None => builder,
        };
        Ok(builder.build())
    }
}

fn credentials(user: &str, password: &str) -> Option<(String, String)> {
    (!user.is_empty() && !password.is_empty()).then(|| (user.to_string(), password.to_string()))
}

/// Factory producing `lettre` SMTP clients.
#[derive(Debug, Clone)]
pub struct SmtpTransportFactory {
    providers: ProvidersConfig,
    default_from: Option<String>,
}

impl SmtpTransportFactory {
    /// Create a factory. `default_from` is used when a message has no sender.
    pub fn new(providers: ProvidersConfig, default_from: Option<String>) -> Self {
        Self {
            providers,
            default_from: default_from.filter(|s| !s.is_empty()),
        }
    }

    /// Connection settings for `provider`.
    ///
    /// | provider  | endpoint                     | security                      |
    /// |-----------|------------------------------|-------------------------------|
    /// | `gmail`   | `smtp.gmail.com:465`         | implicit TLS                  |
    /// | `outlook` | `smtp-mail.outlook.com:587`  | STARTTLS                      |
    /// | `smtp`    | configured host and port     | implicit if `secure`, else opportunistic |
    pub fn profile(&self, provider: Provider) -> ConnectionProfile {
        let (host, port, tls, user, password) = match provider {
            Provider::Gmail => {
                let account = &self.providers.gmail;
                (GMAIL_HOST.to_string(), 465, TlsMode::Implicit, &account.user, &account.password)
            }
            Provider::Outlook => {
                let account = &self.providers.outlook;
                (OUTLOOK_HOST.to_string(), 587, TlsMode::StartTls, &account.user, &account.password)
            }
            Provider::Smtp => {
                let smtp = &self.providers.smtp;
                let tls = if smtp.secure {
                    TlsMode::Implicit
                } else {
                    TlsMode::Opportunistic
                };
                (smtp.host.clone(), smtp.port, tls, &smtp.user, &smtp.password)
            }
        };

        let default_sender = self
            .default_from
            .clone()
            .or_else(|| Some(user.clone()).filter(|u| !u.is_empty()));

        ConnectionProfile {
            host,
            port,
            tls,
            credentials: credentials(user, password),
            default_sender,
        }
    }
}

impl TransportFactory for SmtpTransportFactory {
    fn create(&self, provider: Provider) -> Result<Box<dyn Mailer>, MailError> {
        let profile = self.profile(provider);
        let transport = profile.transport()?;

        tracing::debug!(%provider, host = %profile.host, port = profile.port, "Created SMTP transport");

        Ok(Box::new(SmtpMailer {
            transport,
            default_sender: profile.default_sender,
        }))
    }
}

/// `lettre`-backed [`Mailer`].
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    default_sender: Option<String>,
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailError> {
        let from = email
            .from
            .as_deref()
            .or(self.default_sender.as_deref())
            .ok_or_else(|| MailError::Address("no sender address configured".to_string()))?;

        let (message, message_id) = build_message(email, from)?;
        let response = self.transport.send(message).await?;

        Ok(SendReceipt {
            message_id,
            response: format_response(&response),
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|e| MailError::Address(format!("{address}: {e}")))
}

/// Build the MIME message and its generated `Message-ID`.
pub fn build_message(email: &OutgoingEmail, from: &str) -> Result<(Message, String), MailError> {
    let from = parse_mailbox(from)?;
    let to = parse_mailbox(&email.to)?;
    let message_id = format!("<{}@{}>", Uuid::new_v4(), from.email.domain());

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .message_id(Some(message_id.clone()));

    let body = match (&email.text, &email.html) {
        (Some(text), Some(html)) => Body::Multi(MultiPart::alternative_plain_html(
            text.clone(),
            html.clone(),
        )),
        (Some(text), None) => Body::Single(SinglePart::plain(text.clone())),
        (None, Some(html)) => Body::Single(SinglePart::html(html.clone())),
        (None, None) => return Err(MailError::Build("message has no body".to_string())),
    };

    let built = if email.attachments.is_empty() {
        match body {
            Body::Single(part) => builder.singlepart(part),
            Body::Multi(part) => builder.multipart(part),
        }
    } else {
        let mut mixed = match body {
            Body::Single(part) => MultiPart::mixed().singlepart(part),
            Body::Multi(part) => MultiPart::mixed().multipart(part),
        };
        for attachment in &email.attachments {
            mixed = mixed.singlepart(
                MimeAttachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), attachment.content_type.clone()),
            );
        }
        builder.multipart(mixed)
    };
    let message = built.map_err(|e| MailError::Build(e.to_string()))?;

    Ok((message, message_id))
}

enum Body {
    Single(SinglePart),
    Multi(MultiPart),
}

fn format_response(response: &Response) -> String {
    let lines: Vec<&str> = response.message().collect();
    format!("{} {}", response.code(), lines.join(" "))
}
