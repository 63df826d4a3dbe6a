//! Send handlers for Web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::mail::OutgoingEmail;
use crate::template;
use crate::web::dto::{
    BulkEmailRequest, BulkEmailResponse, JsonBody, SendEmailRequest, SendEmailResponse,
    TemplateEmailRequest, TemplateEmailResponse,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::{AppState, SEND_FAILED};

fn rejected(endpoint: &'static str) -> impl FnOnce(ApiError) -> ApiError {
    move |err| {
        tracing::warn!(endpoint, error = %err.message(), "Request rejected");
        err
    }
}

/// POST /send-email - Send one message.
#[utoipa::path(
    post,
    path = "/send-email",
    tag = "mail",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = SendEmailResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded", body = ErrorBody),
        (status = 500, description = "Delivery failed", body = ErrorBody)
    )
)]
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let (provider, email) = req.validate().map_err(rejected("send-email"))?;

    let receipt = state
        .mail
        .send(provider, &email)
        .await
        .map_err(|e| state.transport_error(e))?;

    Ok(Json(SendEmailResponse {
        success: true,
        message: "Email sent successfully".to_string(),
        message_id: receipt.message_id,
        response: receipt.response,
    }))
}

/// POST /send-bulk-email - Send one message per recipient.
#[utoipa::path(
    post,
    path = "/send-bulk-email",
    tag = "mail",
    request_body = BulkEmailRequest,
    responses(
        (status = 200, description = "Bulk run finished, possibly with per-recipient failures", body = BulkEmailResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded", body = ErrorBody),
        (status = 500, description = "Transport could not be created", body = ErrorBody)
    )
)]
pub async fn send_bulk_email(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<BulkEmailRequest>,
) -> Result<Json<BulkEmailResponse>, ApiError> {
    let bulk = req
        .validate(state.max_bulk_recipients)
        .map_err(rejected("send-bulk-email"))?;

    let mut outcome = state
        .mail
        .send_bulk(bulk.provider, &bulk.recipients, &bulk.email)
        .await
        .map_err(|e| state.transport_error(e))?;

    // Raw failures were logged by the service.
    if !state.expose_transport_errors {
        outcome.redact(SEND_FAILED);
    }

    Ok(Json(outcome.into()))
}

/// POST /send-template-email - Render a registered template and send it.
#[utoipa::path(
    post,
    path = "/send-template-email",
    tag = "mail",
    request_body = TemplateEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = TemplateEmailResponse),
        (status = 400, description = "Validation error or unknown template", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded", body = ErrorBody),
        (status = 500, description = "Delivery failed", body = ErrorBody)
    )
)]
pub async fn send_template_email(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<TemplateEmailRequest>,
) -> Result<Json<TemplateEmailResponse>, ApiError> {
    let send = req.validate().map_err(rejected("send-template-email"))?;
    let rendered = template::render(send.template, &send.variables);

    let email = OutgoingEmail {
        to: send.to,
        from: send.from,
        subject: rendered.subject,
        html: Some(rendered.html),
        ..Default::default()
    };

    let receipt = state
        .mail
        .send(send.provider, &email)
        .await
        .map_err(|e| state.transport_error(e))?;

    Ok(Json(TemplateEmailResponse {
        success: true,
        message: "Template email sent successfully".to_string(),
        message_id: receipt.message_id,
        template: send.template.name.to_string(),
    }))
}
