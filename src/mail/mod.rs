//! Outbound mail.
//!
//! This module provides:
//! - Address syntax validation
//! - Provider profiles and the SMTP transport factory
//! - The delivery service used by the HTTP handlers

mod service;
mod transport;
mod types;
mod validation;

pub use service::MailService;
pub use transport::{
    build_message, ConnectionProfile, MailError, Mailer, Provider, SmtpMailer,
    SmtpTransportFactory, TlsMode, TransportFactory,
};
pub use types::{
    Attachment, BulkOutcome, Delivery, FailedDelivery, OutgoingEmail, SendReceipt,
    DEFAULT_ATTACHMENT_TYPE,
};
pub use validation::is_valid_email;
