//! Request validation.
//!
//! Each request DTO is turned into validated domain values here, or into
//! the 400 [`ApiError`] the endpoint reports. Validation never touches the
//! transport, so a rejected request has no side effects.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::request::{AttachmentPayload, BulkEmailRequest, SendEmailRequest, TemplateEmailRequest};
use crate::mail::{is_valid_email, Attachment, MailError, OutgoingEmail, Provider};
use crate::template::{self, Template};
use crate::web::error::{ApiError, ErrorCode};

/// Single send without recipient, subject or body.
pub const MISSING_SEND_FIELDS: &str = "Missing required fields: to, subject, and text or html";
/// Bulk send without subject or body.
pub const MISSING_BULK_FIELDS: &str = "Missing required fields: subject, and text or html";
/// Template send without recipient or template.
pub const MISSING_TEMPLATE_FIELDS: &str = "Missing required fields: to, template";
/// `recipients` absent, empty or not an array.
pub const RECIPIENTS_NOT_ARRAY: &str = "Recipients must be a non-empty array";
/// Malformed `to`.
pub const INVALID_RECIPIENT: &str = "Invalid recipient email address";
/// Malformed `from`.
pub const INVALID_SENDER: &str = "Invalid sender email address";

/// A JSON extractor whose rejection is an [`ApiError`].
///
/// # Example
///
/// ```ignore
/// async fn handler(JsonBody(payload): JsonBody<SendEmailRequest>) -> Result<Json<_>, ApiError> {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(JsonBody(value))
    }
}

/// Body size and content type rejections keep their status.
fn json_rejection(rejection: JsonRejection) -> ApiError {
    let code = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ErrorCode::PayloadTooLarge,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ErrorCode::UnsupportedMediaType,
        _ => ErrorCode::BadRequest,
    };
    ApiError::new(code, format!("Invalid JSON body: {}", rejection.body_text()))
}

/// A non-empty string field, or `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Validate an optional sender address.
fn sender(from: &Option<String>) -> Result<Option<String>, ApiError> {
    match present(from) {
        Some(from) if !is_valid_email(from) => Err(ApiError::bad_request(INVALID_SENDER)),
        from => Ok(from.map(String::from)),
    }
}

fn invalid_attachment(detail: impl std::fmt::Display) -> ApiError {
    ApiError::bad_request(format!("Invalid attachment: {detail}"))
}

impl AttachmentPayload {
    /// Decode the payload into an [`Attachment`].
    pub fn decode(&self) -> Result<Attachment, ApiError> {
        let filename = present(&self.filename).ok_or_else(|| invalid_attachment("filename is required"))?;
        let content = self
            .content
            .as_deref()
            .ok_or_else(|| invalid_attachment(format!("{filename}: content is required")))?;

        let bytes = match self.encoding.as_deref() {
            None | Some("utf-8") | Some("utf8") => content.as_bytes().to_vec(),
            Some("base64") => BASE64
                .decode(content.trim())
                .map_err(|e| invalid_attachment(format!("{filename}: {e}")))?,
            Some(other) => {
                return Err(invalid_attachment(format!(
                    "{filename}: unsupported encoding {other:?}"
                )))
            }
        };

        Attachment::new(filename, bytes, present(&self.content_type)).map_err(|e| match e {
            MailError::Attachment(detail) => invalid_attachment(detail),
            other => invalid_attachment(other),
        })
    }
}

impl SendEmailRequest {
    /// Validate a single send.
    pub fn validate(&self) -> Result<(Provider, OutgoingEmail), ApiError> {
        let text = present(&self.text);
        let html = present(&self.html);

        let (Some(to), Some(subject)) = (present(&self.to), present(&self.subject)) else {
            return Err(ApiError::bad_request(MISSING_SEND_FIELDS));
        };
        if text.is_none() && html.is_none() {
            return Err(ApiError::bad_request(MISSING_SEND_FIELDS));
        }

        if !is_valid_email(to) {
            return Err(ApiError::bad_request(INVALID_RECIPIENT));
        }
        let from = sender(&self.from)?;

        let attachments = self
            .attachments
            .iter()
            .flatten()
            .map(AttachmentPayload::decode)
            .collect::<Result<Vec<_>, _>>()?;

        let email = OutgoingEmail {
            to: to.to_string(),
            from,
            subject: subject.to_string(),
            text: text.map(String::from),
            html: html.map(String::from),
            attachments,
        };

        Ok((Provider::from_name(self.service.as_deref()), email))
    }
}

/// A validated bulk send.
#[derive(Debug, Clone)]
pub struct BulkSend {
    /// Selected provider.
    pub provider: Provider,
    /// Recipients, in request order.
    pub recipients: Vec<String>,
    /// Message sent to each recipient; `to` is filled per recipient.
    pub email: OutgoingEmail,
}

impl BulkEmailRequest {
    /// Validate a bulk send against the recipient limit.
    ///
    /// Checks run in order: recipient list shape, list size, every address,
    /// then subject and body.
    pub fn validate(&self, max_recipients: usize) -> Result<BulkSend, ApiError> {
        let entries = match &self.recipients {
            Some(Value::Array(entries)) if !entries.is_empty() => entries,
            _ => return Err(ApiError::bad_request(RECIPIENTS_NOT_ARRAY)),
        };

        if entries.len() > max_recipients {
            return Err(ApiError::bad_request(format!(
                "Maximum {max_recipients} recipients allowed per bulk request"
            )));
        }

        let mut recipients = Vec::with_capacity(entries.len());
        let mut invalid = Vec::new();
        for entry in entries {
            match entry {
                Value::String(address) if is_valid_email(address) => {
                    recipients.push(address.clone())
                }
                Value::String(address) => invalid.push(address.clone()),
                other => invalid.push(other.to_string()),
            }
        }
        if !invalid.is_empty() {
            return Err(ApiError::invalid_emails(invalid));
        }

        let text = present(&self.text);
        let html = present(&self.html);
        let Some(subject) = present(&self.subject) else {
            return Err(ApiError::bad_request(MISSING_BULK_FIELDS));
        };
        if text.is_none() && html.is_none() {
            return Err(ApiError::bad_request(MISSING_BULK_FIELDS));
        }
        let from = sender(&self.from)?;

        Ok(BulkSend {
            provider: Provider::from_name(self.service.as_deref()),
            recipients,
            email: OutgoingEmail {
                to: String::new(),
                from,
                subject: subject.to_string(),
                text: text.map(String::from),
                html: html.map(String::from),
                attachments: vec![],
            },
        })
    }
}

/// A validated templated send.
#[derive(Debug, Clone)]
pub struct TemplateSend {
    /// Selected provider.
    pub provider: Provider,
    /// Recipient address.
    pub to: String,
    /// Sender address.
    pub from: Option<String>,
    /// Resolved template.
    pub template: &'static Template,
    /// Placeholder values, in request order.
    pub variables: Map<String, Value>,
}

impl TemplateEmailRequest {
    /// Validate a templated send and resolve its template.
    pub fn validate(&self) -> Result<TemplateSend, ApiError> {
        let (Some(to), Some(name)) = (present(&self.to), present(&self.template)) else {
            return Err(ApiError::bad_request(MISSING_TEMPLATE_FIELDS));
        };

        if !is_valid_email(to) {
            return Err(ApiError::bad_request(INVALID_RECIPIENT));
        }
        let from = sender(&self.from)?;

        let template = template::find(name)?;

        let variables = match &self.variables {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(ApiError::bad_request("Variables must be an object")),
        };

        Ok(TemplateSend {
            provider: Provider::from_name(self.service.as_deref()),
            to: to.to_string(),
            from,
            template,
            variables,
        })
    }
}
