//! API handlers.

pub mod send;
pub mod system;

pub use send::*;
pub use system::*;

use crate::config::MailConfig;
use crate::mail::{MailError, MailService};
use crate::web::error::ApiError;

/// Message of every 500 produced by a failed delivery.
pub const SEND_FAILED: &str = "Failed to send email";

/// Shared state for the send handlers.
#[derive(Clone)]
pub struct AppState {
    /// Delivery service.
    pub mail: MailService,
    /// Largest accepted bulk recipient list.
    pub max_bulk_recipients: usize,
    /// Include raw transport errors in responses.
    pub expose_transport_errors: bool,
    /// Whether `/docs` is served.
    pub docs_enabled: bool,
}

impl AppState {
    /// Create handler state from the mail settings.
    pub fn new(mail: MailService, config: &MailConfig) -> Self {
        Self {
            mail,
            max_bulk_recipients: config.max_bulk_recipients,
            expose_transport_errors: config.expose_transport_errors,
            docs_enabled: false,
        }
    }

    /// Advertise the Swagger UI on the index endpoint.
    pub fn with_docs_enabled(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    /// Log a delivery failure and turn it into a 500.
    pub(crate) fn transport_error(&self, err: MailError) -> ApiError {
        tracing::error!(error = %err, "Email delivery failed");
        ApiError::transport(SEND_FAILED, err.detail(), self.expose_transport_errors)
    }
}
