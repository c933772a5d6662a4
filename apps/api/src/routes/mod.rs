pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::profile::handlers as profile;
use crate::state::AppState;

/// Upper bound for résumé uploads; PDFs routinely exceed axum's 2 MiB default.
const RESUME_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume", post(profile::handle_set_resume))
        .route(
            "/resume-file",
            post(profile::handle_set_resume_file).layer(DefaultBodyLimit::max(RESUME_UPLOAD_LIMIT)),
        )
        .route("/save-location", post(profile::handle_set_save_location))
        .route("/status", get(profile::handle_status))
        .route("/generate-cover-letter", post(generation::handle_generate))
        .route(
            "/generate-cover-letter-text",
            post(generation::handle_generate_text),
        )
        .with_state(state)
}
