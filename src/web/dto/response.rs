//! Response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::mail::{BulkOutcome, Delivery, FailedDelivery};

/// `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    /// Always `OK`.
    pub status: String,
    /// Greeting.
    pub message: String,
    /// Available endpoints.
    pub endpoints: Vec<String>,
}

/// `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `OK`.
    pub status: String,
    /// Status text.
    pub message: String,
}

/// Successful single send.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    /// Always `true`.
    pub success: bool,
    /// Status text.
    pub message: String,
    /// `Message-ID` of the sent message.
    pub message_id: String,
    /// Final SMTP reply.
    pub response: String,
}

/// One accepted recipient of a bulk send.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkSuccess {
    /// Recipient address.
    pub email: String,
    /// Always `true`.
    pub success: bool,
    /// `Message-ID` of the sent message.
    pub message_id: String,
    /// Final SMTP reply.
    pub response: String,
}

impl From<Delivery> for BulkSuccess {
    fn from(d: Delivery) -> Self {
        Self {
            email: d.email,
            success: true,
            message_id: d.receipt.message_id,
            response: d.receipt.response,
        }
    }
}

/// One failed recipient of a bulk send.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkFailure {
    /// Recipient address.
    pub email: String,
    /// Always `false`.
    pub success: bool,
    /// Error text.
    pub error: String,
}

impl From<FailedDelivery> for BulkFailure {
    fn from(f: FailedDelivery) -> Self {
        Self {
            email: f.email,
            success: false,
            error: f.error,
        }
    }
}

/// Bulk send report. Returned even when every recipient failed.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkEmailResponse {
    /// Always `true`.
    pub success: bool,
    /// Summary with counts.
    pub message: String,
    /// Accepted recipients, in input order.
    pub results: Vec<BulkSuccess>,
    /// Failed recipients, in input order.
    pub errors: Vec<BulkFailure>,
}

impl From<BulkOutcome> for BulkEmailResponse {
    fn from(outcome: BulkOutcome) -> Self {
        Self {
            success: true,
            message: format!(
                "Bulk email sending completed. Sent: {}, Failed: {}",
                outcome.sent.len(),
                outcome.failed.len()
            ),
            results: outcome.sent.into_iter().map(BulkSuccess::from).collect(),
            errors: outcome.failed.into_iter().map(BulkFailure::from).collect(),
        }
    }
}

/// Successful templated send.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEmailResponse {
    /// Always `true`.
    pub success: bool,
    /// Status text.
    pub message: String,
    /// `Message-ID` of the sent message.
    pub message_id: String,
    /// Template used.
    pub template: String,
}
