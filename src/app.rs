use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/subjects", get(handlers::list_subjects))
        .route(
            "/api/session",
            post(handlers::start_session).delete(handlers::end_session),
        )
        .route(
            "/api/attendance",
            get(handlers::get_attendance).post(handlers::record_decision),
        )
        .with_state(state)
}
