//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::template::{self, TemplateError};

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Payload too large (413).
    PayloadTooLarge,
    /// Unsupported media type (415).
    UnsupportedMediaType,
    /// Too many requests (429).
    TooManyRequests,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error.
    pub error: String,
    /// Underlying failure text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Addresses that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_emails: Option<Vec<String>>,
    /// Valid template identifiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_templates: Option<Vec<String>>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<String>,
    invalid_emails: Option<Vec<String>>,
    available_templates: Option<Vec<String>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            invalid_emails: None,
            available_templates: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Reject a request because some addresses are malformed.
    pub fn invalid_emails(invalid: Vec<String>) -> Self {
        Self {
            invalid_emails: Some(invalid),
            ..Self::bad_request("Invalid email addresses found")
        }
    }

    /// Reject a request naming an unknown template.
    pub fn template_not_found() -> Self {
        Self {
            available_templates: Some(template::names().into_iter().map(String::from).collect()),
            ..Self::bad_request("Template not found")
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a rate limit error.
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TooManyRequests, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Report a delivery failure. `detail` is only included when `expose` is set.
    pub fn transport(message: impl Into<String>, detail: impl Into<String>, expose: bool) -> Self {
        Self {
            details: expose.then(|| detail.into()),
            ..Self::internal(message)
        }
    }

    /// Error code of this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();

        if self.code == ErrorCode::NotFound {
            return (status, Json(json!({ "error": self.message }))).into_response();
        }

        let body = ErrorBody {
            success: false,
            error: self.message,
            details: self.details,
            invalid_emails: self.invalid_emails,
            available_templates: self.available_templates,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(_) => ApiError::template_not_found(),
        }
    }
}
