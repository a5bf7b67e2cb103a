use crate::{
    AppState,
    auth::{IdentityProvider, Session, issue_token},
    config::Env,
    models::{
        DashboardView, LoginInfo, LoginRequest, TokenResponse, UserProfile, WelcomeView,
    },
    routes::NamedRoute,
};
use axum::{Json, extract::State, http::StatusCode};

// --- Public ---

/// home
///
/// [Public Route] Landing page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page", body = WelcomeView))
)]
pub async fn home() -> Json<WelcomeView> {
    Json(WelcomeView {
        message: "Welcome to the campus portal.".to_string(),
        login: NamedRoute::Login.path().to_string(),
        dashboard: NamedRoute::Dashboard.path().to_string(),
    })
}

/// login_page
///
/// [Public Route] The login route. Unauthenticated requests to gated views land here.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login instructions", body = LoginInfo))
)]
pub async fn login_page() -> Json<LoginInfo> {
    Json(LoginInfo {
        message: "Authentication required. Present a bearer token issued by the identity provider."
            .to_string(),
        scheme: "Bearer".to_string(),
    })
}

/// issue_login_token
///
/// [Public Route, Local only] Signs a token for an existing user by email.
/// Returns `404` outside `Env::Local` and `401` for an unknown email.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Unknown user"),
        (status = 404, description = "Disabled outside the local environment")
    )
)]
pub async fn issue_login_token(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, StatusCode> {
    if state.config.env != Env::Local {
        return Err(StatusCode::NOT_FOUND);
    }

    let user = state
        .repo
        .get_user_by_email(&payload.email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to look up user for login");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = issue_token(user.id, &state.config).map_err(|e| {
        tracing::error!(error = %e, "Failed to issue token");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!(user_id = %user.id, "Issued local login token");
    Ok(Json(token))
}

// --- Authenticated (any role) ---

/// dashboard
///
/// [Authenticated Route] Role-neutral dashboard.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardView),
        (status = 303, description = "Redirect to the login route")
    )
)]
pub async fn dashboard(session: Session) -> Json<DashboardView> {
    Json(dashboard_view("Dashboard", &session))
}

/// profile
///
/// [Authenticated Route] The stored record of the current user.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 303, description = "Redirect to the login route")
    )
)]
pub async fn profile(session: Session) -> Result<Json<UserProfile>, StatusCode> {
    session
        .account()
        .map(|user| Json(UserProfile::from(user)))
        .ok_or(StatusCode::UNAUTHORIZED)
}

// --- Role-gated ---

/// admin_dashboard
///
/// [Admin Route]
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Admin dashboard", body = DashboardView),
        (status = 303, description = "Redirect to the login route"),
        (status = 403, description = "Unauthorized access.")
    )
)]
pub async fn admin_dashboard(session: Session) -> Json<DashboardView> {
    Json(dashboard_view("Admin Dashboard", &session))
}

/// student_dashboard
///
/// [Student Route]
#[utoipa::path(
    get,
    path = "/student/dashboard",
    responses(
        (status = 200, description = "Student dashboard", body = DashboardView),
        (status = 303, description = "Redirect to the login route"),
        (status = 403, description = "Unauthorized access.")
    )
)]
pub async fn student_dashboard(session: Session) -> Json<DashboardView> {
    Json(dashboard_view("Student Dashboard", &session))
}

fn dashboard_view(title: &str, session: &Session) -> DashboardView {
    let name = session.account().map_or("guest", |user| user.name.as_str());
    DashboardView {
        title: title.to_string(),
        greeting: format!("Welcome, {name}"),
        role: session.current_principal().map(|p| p.role),
    }
}
