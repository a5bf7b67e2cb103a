use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Nested under `/admin` and gated with `Requirement::Role(Role::Administrator)`.
/// Students are rejected with `403`; the admin role grants nothing outside this group.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard
        .route("/dashboard", get(handlers::admin_dashboard))
}
