//! HTTP gateway (Axum).
//!
//! Transport concerns only: routing, request validation, error mapping.
//! The scoring pipeline itself lives in [`crate::engine`].

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use state::HandlerState;

use handler::{
    check_metadata_similarity_handler, check_similarity_handler, extract_pdf_text_handler,
    health_handler,
};

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/check-similarity", post(check_similarity_handler))
        .route(
            "/check-metadata-similarity",
            post(check_metadata_similarity_handler),
        )
        .route("/extract-pdf-text", post(extract_pdf_text_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
