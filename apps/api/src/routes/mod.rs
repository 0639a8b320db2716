pub mod health;
pub mod pages;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::analysis::handlers;
use crate::state::AppState;

/// Uploaded resumes routinely exceed axum's 2 MB default body limit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_page))
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
