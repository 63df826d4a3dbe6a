//! OpenAPI document for the relay.

use utoipa::OpenApi;

use super::dto::{
    AttachmentPayload, BulkEmailRequest, BulkEmailResponse, BulkFailure, BulkSuccess,
    HealthResponse, IndexResponse, SendEmailRequest, SendEmailResponse, TemplateEmailRequest,
    TemplateEmailResponse,
};
use super::error::ErrorBody;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mail Relay API",
        description = "HTTP front end for sending email through Gmail, Outlook or a generic SMTP server"
    ),
    tags(
        (name = "system", description = "Service status"),
        (name = "mail", description = "Email sending")
    ),
    paths(
        handlers::index,
        handlers::health,
        handlers::send_email,
        handlers::send_bulk_email,
        handlers::send_template_email,
    ),
    components(schemas(
        IndexResponse,
        HealthResponse,
        AttachmentPayload,
        SendEmailRequest,
        SendEmailResponse,
        BulkEmailRequest,
        BulkEmailResponse,
        BulkSuccess,
        BulkFailure,
        TemplateEmailRequest,
        TemplateEmailResponse,
        ErrorBody,
    ))
)]
pub struct ApiDoc;
