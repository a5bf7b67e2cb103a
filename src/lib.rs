use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;

// Routing segregated by access requirement (Public, Authenticated, Admin, Student).
pub mod routes;
use routes::{admin, authenticated, public, student};

use auth::Session;
use gate::{Decision, Requirement};
use models::Role;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for every route, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home, handlers::login_page, handlers::issue_login_token,
        handlers::dashboard, handlers::profile,
        handlers::admin_dashboard, handlers::student_dashboard
    ),
    components(
        schemas(
            models::Role, models::User, models::LoginRequest, models::TokenResponse,
            models::LoginInfo, models::WelcomeView, models::DashboardView, models::UserProfile,
        )
    ),
    tags(
        (name = "campus-portal", description = "Role-gated campus portal")
    )
)]
struct ApiDoc;

/// AppState
///
/// The shared, cloneable application state. Handlers and extractors pull the
/// pieces they need through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: the user table.
    pub repo: RepositoryState,
    /// Configuration: loaded once at startup.
    pub config: AppConfig,
}

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// GateState
///
/// State handed to one instance of the access-gate middleware: the application
/// state (so the `Session` extractor can resolve identity) plus the requirement
/// that instance enforces.
#[derive(Clone)]
pub struct GateState {
    app: AppState,
    requirement: Requirement,
}

impl GateState {
    pub fn new(app: AppState, requirement: Requirement) -> Self {
        Self { app, requirement }
    }
}

impl FromRef<GateState> for RepositoryState {
    fn from_ref(gate: &GateState) -> RepositoryState {
        gate.app.repo.clone()
    }
}

impl FromRef<GateState> for AppConfig {
    fn from_ref(gate: &GateState) -> AppConfig {
        gate.app.config.clone()
    }
}

impl FromRef<GateState> for Requirement {
    fn from_ref(gate: &GateState) -> Requirement {
        gate.requirement
    }
}

/// access_gate
///
/// Middleware wrapping every protected route group. Resolves the request's
/// `Session`, asks the gate for a `Decision` and carries it out:
/// - `Continue`: the request goes to the next handler unchanged.
/// - `RedirectTo`: `303 See Other` to the named route.
/// - `RejectWith`: the given status with the message as a plain-text body.
async fn access_gate(
    State(requirement): State<Requirement>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    match gate::check(&session, requirement) {
        Decision::Continue => next.run(request).await,
        Decision::RedirectTo(route) => {
            tracing::debug!(?requirement, redirect = route.name(), "Access gate: not authenticated");
            Redirect::to(route.path()).into_response()
        }
        Decision::RejectWith { status, message } => {
            tracing::debug!(
                ?requirement,
                user_id = ?session.account().map(|u| u.id),
                "Access gate: forbidden"
            );
            (status, message).into_response()
        }
    }
}

/// Wraps `router` in an access gate enforcing `requirement`.
fn gated(router: Router<AppState>, state: &AppState, requirement: Requirement) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        GateState::new(state.clone(), requirement),
        access_gate,
    ))
}

/// create_router
///
/// Assembles the route groups, binds each protected group to its requirement,
/// and applies the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(gated(
            authenticated::authenticated_routes(),
            &state,
            Requirement::Authenticated,
        ))
        .nest(
            "/admin",
            gated(
                admin::admin_routes(),
                &state,
                Requirement::Role(Role::Administrator),
            ),
        )
        .nest(
            "/student",
            gated(
                student::student_routes(),
                &state,
                Requirement::Role(Role::Student),
            ),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for `TraceLayer`: method, uri and the `x-request-id` set above, so every
/// log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
