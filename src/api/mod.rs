use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::completion::CompletionClient;
use crate::pdf::MAX_PDF_BYTES;
use crate::search::WebSearch;

pub mod handlers;
pub mod models;

/// Room for the largest accepted PDF plus multipart framing.
const PDF_BODY_LIMIT: usize = MAX_PDF_BYTES + 1024 * 1024;

pub struct AppState {
    pub web_search: WebSearch,
    /// `None` when no completion API key is configured.
    pub completion: Option<CompletionClient>,
}

impl AppState {
    pub fn from_config() -> Self {
        Self {
            web_search: WebSearch::from_config(),
            completion: CompletionClient::from_config(),
        }
    }
}

pub fn create_router(state: Arc<AppState>, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/search", post(handlers::search_handler))
        .route("/api/chat", post(handlers::chat_handler))
        .route(
            "/api/parse-pdf",
            post(handlers::parse_pdf_handler).layer(DefaultBodyLimit::max(PDF_BODY_LIMIT)),
        )
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}
