use crate::{AppState, handlers};
use axum::{
    Router,
    routing::get,
};

/// Public Router Module
///
/// Endpoints reachable without a session. `/login` is the redirect target for every
/// unauthenticated request to a gated route, so it must stay in this group.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Landing page with links to the login and dashboard routes.
        .route("/", get(handlers::home))
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /login, POST /login
        // GET explains how to authenticate; POST mints a token in the local environment only.
        .route(
            "/login",
            get(handlers::login_page).post(handlers::issue_login_token),
        )
}
