//! Mail relay
//!
//! An HTTP service that accepts JSON requests and delivers email through
//! Gmail, Outlook or a generic SMTP server.

pub mod config;
pub mod error;
pub mod logging;
pub mod mail;
pub mod template;
pub mod web;

pub use config::Config;
pub use error::{RelayError, Result};
pub use mail::{
    is_valid_email, MailError, MailService, Mailer, OutgoingEmail, Provider, SendReceipt,
    SmtpTransportFactory, TransportFactory,
};
pub use template::{Template, TemplateError};
pub use web::{create_router, AppState, WebServer};
