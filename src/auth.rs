use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    models::{Principal, TokenResponse, User},
    repository::RepositoryState,
};

/// Header accepted in `Env::Local` in place of a bearer token.
pub const DEV_USER_HEADER: &str = "x-user-id";

/// Claims
///
/// Payload of the bearer tokens this service accepts. Tokens are signed with
/// `AppConfig::jwt_secret` (HS256) and rejected once `exp` has passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the id of the user in the `users` table.
    pub sub: Uuid,
    /// Expiration time (seconds since the epoch).
    pub exp: usize,
    /// Issued at (seconds since the epoch).
    pub iat: usize,
}

/// IdentityProvider
///
/// What the access gate needs to know about a request: whether a valid credential
/// was attached, and who it belongs to. Implementations resolve both before the
/// gate is consulted; neither method may block.
pub trait IdentityProvider {
    fn is_authenticated(&self) -> bool;

    /// The resolved principal. `None` for anonymous requests, and also for
    /// authenticated requests whose stored role is not a known [`Role`](crate::models::Role).
    fn current_principal(&self) -> Option<&Principal>;
}

/// Session
///
/// The identity resolved for a single request. Built by the `FromRequestParts`
/// implementation below and cached in the request extensions, so the gate
/// middleware and the handler behind it share one lookup.
#[derive(Debug, Clone, Default)]
pub struct Session {
    account: Option<User>,
    principal: Option<Principal>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated session for `user`. The principal is only populated when
    /// the user's role label parses.
    pub fn for_user(user: User) -> Self {
        let principal = Principal::try_from(&user).ok();
        Self {
            account: Some(user),
            principal,
        }
    }

    /// The raw user record behind an authenticated session.
    pub fn account(&self) -> Option<&User> {
        self.account.as_ref()
    }
}

impl IdentityProvider for Session {
    fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    fn current_principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// Session Extractor Implementation
///
/// Resolution order:
/// 1. A session already cached in the request extensions is reused.
/// 2. In `Env::Local`, a UUID in the `x-user-id` header names the subject directly.
/// 3. If that yields no user, a `Bearer` token is decoded and its `sub` claim names the subject.
/// 4. Each subject is looked up in the repository.
///
/// A missing, malformed, expired or wrongly-signed token, or a subject with no
/// user row, yields an anonymous session rather than a rejection: deciding what
/// an anonymous request may do is the gate's job.
///
/// Rejection: `500` only when the repository itself fails.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        // A bypass id without a user row falls through to the bearer token.
        let mut session = None;
        if let Some(user_id) = bypass_subject(parts, &config) {
            session = load_session(&repo, user_id).await?;
        }
        if session.is_none() {
            if let Some(user_id) = bearer_subject(parts, &config) {
                session = load_session(&repo, user_id).await?;
            }
        }
        let session = session.unwrap_or_else(Session::anonymous);

        parts.extensions.insert(session.clone());
        Ok(session)
    }
}

/// Looks up `user_id`. `Ok(None)` when the subject has no user row.
async fn load_session(
    repo: &RepositoryState,
    user_id: Uuid,
) -> Result<Option<Session>, StatusCode> {
    match repo.get_user(user_id).await {
        Ok(Some(user)) => {
            let session = Session::for_user(user);
            if session.current_principal().is_none() {
                tracing::warn!(%user_id, "User record carries an unknown role label");
            }
            Ok(Some(session))
        }
        Ok(None) => {
            tracing::debug!(%user_id, "Credential subject has no user record");
            Ok(None)
        }
        Err(e) => {
            tracing::error!(%user_id, error = %e, "Failed to load user for session");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// The `x-user-id` subject, honoured in `Env::Local` only.
fn bypass_subject(parts: &Parts, config: &AppConfig) -> Option<Uuid> {
    if config.env != Env::Local {
        return None;
    }
    parts
        .headers
        .get(DEV_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|id| Uuid::parse_str(id).ok())
}

/// The `sub` claim of a valid `Bearer` token, if one is attached.
fn bearer_subject(parts: &Parts, config: &AppConfig) -> Option<Uuid> {
    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))?;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Some(data.claims.sub),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            None
        }
    }
}

/// Raised when a token cannot be issued.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("token lifetime of {0}s does not fit the expiry claim")]
    LifetimeOverflow(u64),
}

/// issue_token
///
/// Signs a bearer token for `user_id` valid for `config.token_ttl_secs`.
pub fn issue_token(user_id: Uuid, config: &AppConfig) -> Result<TokenResponse, TokenError> {
    let now = Utc::now().timestamp().max(0) as usize;
    let ttl = config.token_ttl_secs;
    let exp = usize::try_from(ttl)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or(TokenError::LifetimeOverflow(ttl))?;
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let access_token = encode(&Header::default(), &claims, &key)?;

    Ok(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: config.token_ttl_secs,
    })
}
