//! Mail types.

use lettre::message::header::ContentType;

use super::MailError;

/// Fallback MIME type for attachments.
pub const DEFAULT_ATTACHMENT_TYPE: &str = "application/octet-stream";

/// A file attached to an outgoing email.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// MIME type.
    pub content_type: ContentType,
    /// Raw bytes.
    pub content: Vec<u8>,
}

impl Attachment {
    /// Create an attachment.
    ///
    /// When `content_type` is `None` the type is guessed from the file
    /// extension, falling back to `application/octet-stream`.
    pub fn new(
        filename: impl Into<String>,
        content: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<Self, MailError> {
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(MailError::Attachment("filename is required".to_string()));
        }

        let mime = match content_type {
            Some(ct) => ct.to_string(),
            None => mime_guess::from_path(&filename)
                .first_raw()
                .unwrap_or(DEFAULT_ATTACHMENT_TYPE)
                .to_string(),
        };
        let content_type = ContentType::parse(&mime)
            .map_err(|e| MailError::Attachment(format!("{filename}: bad content type {mime:?}: {e}")))?;

        Ok(Self {
            filename,
            content_type,
            content,
        })
    }
}

/// A single message ready for delivery.
#[derive(Debug, Clone, Default)]
pub struct OutgoingEmail {
    /// Recipient address.
    pub to: String,
    /// Sender address. `None` uses the transport's default sender.
    pub from: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: Option<String>,
    /// HTML body.
    pub html: Option<String>,
    /// Attached files.
    pub attachments: Vec<Attachment>,
}

/// What the provider reported for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// `Message-ID` header of the sent message.
    pub message_id: String,
    /// Final SMTP reply, e.g. `250 2.0.0 OK`.
    pub response: String,
}

/// Result of one recipient in a bulk send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Recipient address.
    pub email: String,
    /// Provider receipt.
    pub receipt: SendReceipt,
}

/// A recipient whose send failed during a bulk send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelivery {
    /// Recipient address.
    pub email: String,
    /// Error text.
    pub error: String,
}

/// Outcome of a bulk send, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Accepted messages.
    pub sent: Vec<Delivery>,
    /// Rejected or failed messages.
    pub failed: Vec<FailedDelivery>,
}

impl BulkOutcome {
    /// Replace every failure text with `text`.
    pub fn redact(&mut self, text: &str) {
        for failure in &mut self.failed {
            failure.error = text.to_string();
        }
    }
}
