//! HTTP API for the mail relay.
//!
//! JSON endpoints for single, bulk and templated sends, plus index, health
//! and optional Swagger UI.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
