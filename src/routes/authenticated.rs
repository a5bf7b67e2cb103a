use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes for any signed-in user. Gated with `Requirement::Authenticated`: no role
/// check, anonymous requests are redirected to the login route.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /dashboard
        // Role-neutral landing view after login.
        .route("/dashboard", get(handlers::dashboard))
        // GET /profile
        // The current user's stored record.
        .route("/profile", get(handlers::profile))
}
