use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Roles & Identity ---

/// Role
///
/// The closed set of roles a principal can hold. The two roles are siblings:
/// neither one implies the other.
///
/// Stored and serialized as the labels `"admin"` and `"student"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum Role {
    #[serde(rename = "admin")]
    Administrator,
    #[serde(rename = "student")]
    Student,
}

impl Role {
    /// The storage label for this role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored label is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role label: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact, case-sensitive match against the storage labels.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "admin" => Ok(Role::Administrator),
            "student" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User
///
/// A row of the `users` table. The `role` column is kept as the raw label here;
/// it only becomes a typed [`Role`] once the record is turned into a [`Principal`].
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Principal
///
/// The authenticated actor attached to a request. Credentials never live here;
/// they belong to whoever issued the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl TryFrom<&User> for Principal {
    type Error = UnknownRole;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Principal {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.parse()?,
        })
    }
}

/// NewUser
///
/// Input for creating a user record (used by the seeder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

// --- Request Payloads ---

/// LoginRequest
///
/// Body of `POST /login`. Only honoured in the local environment, where it mints a
/// token for an existing user so the gated views can be exercised without an
/// external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "student@example.com")]
    pub email: String,
}

// --- Response Schemas ---

/// TokenResponse
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime of the token in seconds.
    pub expires_in: u64,
}

/// LoginInfo
///
/// Served at the login route, which is where unauthenticated requests to gated
/// views are redirected.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginInfo {
    pub message: String,
    /// How the client is expected to present its credential.
    pub scheme: String,
}

/// WelcomeView
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct WelcomeView {
    pub message: String,
    pub login: String,
    pub dashboard: String,
}

/// DashboardView
///
/// Payload of every dashboard route. `role` is absent when the session's user record
/// carries a label outside the known roles.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DashboardView {
    pub title: String,
    pub greeting: String,
    pub role: Option<Role>,
}

/// UserProfile
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}
