use axum::http::StatusCode;

use crate::{auth::IdentityProvider, models::Role, routes::NamedRoute};

/// Message sent with every role mismatch.
pub const FORBIDDEN_MESSAGE: &str = "Unauthorized access.";

/// Decision
///
/// Outcome of one gate evaluation. The gate only returns it; the middleware in
/// `lib.rs` turns it into an HTTP response (or lets the request through).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the protected handler with the request untouched.
    Continue,
    /// No valid session: send the client to the named route.
    RedirectTo(NamedRoute),
    /// Authenticated but not allowed. Terminal.
    RejectWith {
        status: StatusCode,
        message: &'static str,
    },
}

impl Decision {
    pub fn is_continue(&self) -> bool {
        matches!(self, Decision::Continue)
    }
}

/// Requirement
///
/// What a route group demands, fixed when the router is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated session, regardless of role.
    Authenticated,
    /// An authenticated principal holding exactly this role.
    Role(Role),
}

/// evaluate
///
/// Decides whether a request may reach a route that requires `required`.
///
/// The authentication check always runs first, so an anonymous request is never
/// compared against the role. Roles match exactly; there is no hierarchy. An
/// authenticated request without a resolvable principal can never match and is
/// rejected like any other mismatch.
///
/// Pure: no I/O, no logging, same inputs give the same decision.
pub fn evaluate<I>(identity: &I, required: Role) -> Decision
where
    I: IdentityProvider + ?Sized,
{
    if !identity.is_authenticated() {
        return Decision::RedirectTo(NamedRoute::Login);
    }

    match identity.current_principal() {
        Some(principal) if principal.role == required => Decision::Continue,
        _ => Decision::RejectWith {
            status: StatusCode::FORBIDDEN,
            message: FORBIDDEN_MESSAGE,
        },
    }
}

/// check
///
/// `evaluate` generalised to a route group's [`Requirement`].
pub fn check<I>(identity: &I, requirement: Requirement) -> Decision
where
    I: IdentityProvider + ?Sized,
{
    match requirement {
        Requirement::Role(role) => evaluate(identity, role),
        Requirement::Authenticated if identity.is_authenticated() => Decision::Continue,
        Requirement::Authenticated => Decision::RedirectTo(NamedRoute::Login),
    }
}
