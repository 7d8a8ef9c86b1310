use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Question generation glue
        .route(
            "/generate-questions",
            get(handlers::generate_questions_info).post(handlers::generate_questions),
        )
        // Session control
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:session_id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/:session_id/call", post(handlers::call_session))
        .route(
            "/sessions/:session_id/disconnect",
            post(handlers::disconnect_session),
        )
        .route(
            "/sessions/:session_id/transcript",
            get(handlers::get_session_transcript),
        )
        // Stored documents
        .route("/interviews/:interview_id", get(handlers::get_interview))
        .route("/feedback/:feedback_id", get(handlers::get_feedback))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
