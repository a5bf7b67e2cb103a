use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Student Router Module
///
/// Nested under `/student` and gated with `Requirement::Role(Role::Student)`.
/// Administrators are rejected here too.
pub fn student_routes() -> Router<AppState> {
    Router::new()
        // GET /student/dashboard
        .route("/dashboard", get(handlers::student_dashboard))
}
