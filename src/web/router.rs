//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    health, index, not_found, send_bulk_email, send_email, send_template_email, AppState,
};
use super::middleware::{create_cors_layer, security_headers, send_rate_limit, RateLimitState};
use super::openapi::ApiDoc;
use crate::config::WebConfig;

/// Create the main API router.
///
/// The rate limit covers the three send endpoints only.
pub fn create_router(
    app_state: Arc<AppState>,
    rate_limit_state: Arc<RateLimitState>,
    web_config: &WebConfig,
) -> Router {
    let send_routes = Router::new()
        .route("/send-email", post(send_email))
        .route("/send-bulk-email", post(send_bulk_email))
        .route("/send-template-email", post(send_template_email))
        .route_layer(middleware::from_fn(move |req, next| {
            let state = rate_limit_state.clone();
            send_rate_limit(state, req, next)
        }));

    let mut router = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(send_routes);

    if web_config.enable_docs {
        router = router.merge(create_swagger_router::<Arc<AppState>>());
    }

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&web_config.cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Swagger UI at `/docs`, document at `/api-docs/openapi.json`.
pub fn create_swagger_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
