//! Request DTOs.
//!
//! Fields are optional at the serde level so that missing values produce
//! the endpoint's own validation message instead of a JSON rejection.

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// File attached to a single send.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentPayload {
    /// File name shown to the recipient.
    pub filename: Option<String>,
    /// File content, literal text or base64 depending on `encoding`.
    pub content: Option<String>,
    /// MIME type. Guessed from the file name when absent.
    pub content_type: Option<String>,
    /// `base64`, or `utf-8` (default).
    pub encoding: Option<String>,
}

/// `POST /send-email`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    /// Recipient address.
    pub to: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Plain-text body.
    pub text: Option<String>,
    /// HTML body.
    pub html: Option<String>,
    /// Sender address.
    pub from: Option<String>,
    /// Provider: `gmail` (default), `outlook` or `smtp`.
    pub service: Option<String>,
    /// Attached files.
    pub attachments: Option<Vec<AttachmentPayload>>,
}

/// `POST /send-bulk-email`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkEmailRequest {
    /// Recipient addresses.
    #[schema(value_type = Option<Vec<String>>)]
    pub recipients: Option<Value>,
    /// Subject line.
    pub subject: Option<String>,
    /// Plain-text body.
    pub text: Option<String>,
    /// HTML body.
    pub html: Option<String>,
    /// Sender address.
    pub from: Option<String>,
    /// Provider: `gmail` (default), `outlook` or `smtp`.
    pub service: Option<String>,
}

/// `POST /send-template-email`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEmailRequest {
    /// Recipient address.
    pub to: Option<String>,
    /// Template identifier.
    pub template: Option<String>,
    /// Placeholder values.
    #[schema(value_type = Option<Object>)]
    pub variables: Option<Value>,
    /// Provider: `gmail` (default), `outlook` or `smtp`.
    pub service: Option<String>,
    /// Sender address.
    pub from: Option<String>,
}
