//! Service information handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::{HealthResponse, IndexResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Routes that are always served.
const CORE_ENDPOINTS: [&str; 4] = [
    "GET /health",
    "POST /send-email",
    "POST /send-bulk-email",
    "POST /send-template-email",
];

/// Routes listed by the index endpoint.
pub fn endpoints(docs_enabled: bool) -> Vec<String> {
    let mut list: Vec<String> = CORE_ENDPOINTS.iter().map(|e| e.to_string()).collect();
    if docs_enabled {
        list.push("GET /docs".to_string());
    }
    list
}

/// GET / - Service description.
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Service description", body = IndexResponse))
)]
pub async fn index(State(state): State<Arc<AppState>>) -> Json<IndexResponse> {
    Json(IndexResponse {
        status: "OK".to_string(),
        message: "Mail relay API is running".to_string(),
        endpoints: endpoints(state.docs_enabled),
    })
}

/// GET /health - Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Email service is healthy".to_string(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Endpoint not found")
}
