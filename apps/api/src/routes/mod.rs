pub mod connection;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::ingest::MAX_UPLOAD_BYTES;
use crate::session::handlers;
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/connection",
            get(connection::handle_connection_check),
        )
        // Session flow
        .route(
            "/api/v1/sessions",
            post(handlers::handle_create_session)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD)),
        )
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/goal",
            put(handlers::handle_set_goal).delete(handlers::handle_reset_goal),
        )
        .route(
            "/api/v1/sessions/:id/roadmap",
            post(handlers::handle_regenerate_roadmap),
        )
        .route(
            "/api/v1/sessions/:id/report",
            get(handlers::handle_get_report),
        )
        .route("/api/v1/sessions/:id/chat", post(handlers::handle_chat))
        .with_state(state)
}
