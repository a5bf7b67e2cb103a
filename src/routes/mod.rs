//! Router Module Index
//!
//! Routes are split by access requirement. Each protected module is wrapped in the
//! access-gate middleware in `create_router`, bound to exactly one requirement, so
//! a handler can never be mounted without its gate.

/// Routes open to everyone: landing page, health check, login.
pub mod public;

/// Routes that need any authenticated session, whatever the role.
pub mod authenticated;

/// Routes restricted to the administrator role. Mounted under `/admin`.
pub mod admin;

/// Routes restricted to the student role. Mounted under `/student`.
pub mod student;

/// NamedRoute
///
/// Stable names for the paths the application redirects to or links between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedRoute {
    Home,
    Login,
    Dashboard,
    Profile,
    AdminDashboard,
    StudentDashboard,
}

impl NamedRoute {
    pub const fn path(&self) -> &'static str {
        match self {
            NamedRoute::Home => "/",
            NamedRoute::Login => "/login",
            NamedRoute::Dashboard => "/dashboard",
            NamedRoute::Profile => "/profile",
            NamedRoute::AdminDashboard => "/admin/dashboard",
            NamedRoute::StudentDashboard => "/student/dashboard",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            NamedRoute::Home => "home",
            NamedRoute::Login => "login",
            NamedRoute::Dashboard => "dashboard",
            NamedRoute::Profile => "profile",
            NamedRoute::AdminDashboard => "admin.dashboard",
            NamedRoute::StudentDashboard => "student.dashboard",
        }
    }
}
