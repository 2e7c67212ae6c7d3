pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::grading::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/gradeAssignment",
            post(handlers::handle_grade_assignment)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
