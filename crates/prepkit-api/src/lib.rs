//! # prepkit-api
//!
//! HTTP API server for the prepkit study-aid service.
//!
//! Routes a handful of single-purpose POST endpoints: upload a PDF and
//! generate a cheat sheet, quiz, or mnemonics; request feedback or
//! replacement practice questions for struggled quiz items; and manage the
//! temporary artifacts the flows leave behind.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use prepkit_core::defaults::MAX_BODY_SIZE_BYTES;
use prepkit_core::AiBackend;

pub use error::ApiError;
pub use store::{ArtifactStore, Sidecar};

/// Application state shared across handlers.
///
/// One long-lived backend client, injected at startup; handlers never
/// construct their own.
#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<dyn AiBackend>,
    pub store: ArtifactStore,
}

impl AppState {
    pub fn new(ai: Arc<dyn AiBackend>, store: ArtifactStore) -> Self {
        Self { ai, store }
    }
}

/// Build the router. Single-purpose handlers: a wrong method on any route
/// answers 405.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/upload-and-generate", post(handlers::upload_and_generate))
        .route(
            "/upload-and-generate-quiz",
            post(handlers::upload_and_generate_quiz),
        )
        .route(
            "/upload-and-generate-mnemonics",
            post(handlers::upload_and_generate_mnemonics),
        )
        .route("/get-feedback", post(handlers::get_feedback))
        .route("/get-morequestions", post(handlers::get_more_questions))
        .route("/api/delete-temp-file", post(handlers::delete_temp_file))
        .route("/api/cleanup", post(handlers::cleanup))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
