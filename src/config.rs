use std::env;

/// AppConfig
///
/// Holds the application's configuration. Loaded once at startup and shared
/// read-only through the application state via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the dev bypass and the local token endpoint.
    pub env: Env,
    // Postgres connection string. Optional locally, where an in-memory store is used instead.
    pub db_url: Option<String>,
    // Secret used to sign and validate bearer tokens (HS256).
    pub jwt_secret: String,
    // Address the HTTP server binds to.
    pub bind_addr: String,
    // Seed the demo administrator and student on startup.
    pub seed_demo_users: bool,
    // Lifetime of tokens minted by the local login endpoint, in seconds.
    pub token_ttl_secs: u64,
}

/// Env
///
/// Runtime context. `Local` enables development conveniences (`x-user-id` bypass,
/// token minting, in-memory store); `Production` hardens all of them off.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Raised by [`AppConfig::load`] when the environment is incomplete.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    MissingVar(&'static str),
    #[error("{name} is not a valid number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

const LOCAL_JWT_SECRET: &str = "campus-portal-local-secret";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
/// Upper bound for `TOKEN_TTL_SECS` (30 days).
pub const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 3600;

impl Default for AppConfig {
    /// A local configuration with no database, used by tests to build state
    /// without touching the process environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            db_url: None,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            seed_demo_users: false,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Errors
    /// In production, `DATABASE_URL` and `JWT_SECRET` are mandatory. A `TOKEN_TTL_SECS`
    /// that is not a number in `1..=MAX_TOKEN_TTL_SECS` is rejected in every environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let db_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());

        let (db_url, jwt_secret) = match env {
            Env::Production => (
                Some(db_url.ok_or(ConfigError::MissingVar("DATABASE_URL"))?),
                jwt_secret.ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
            ),
            Env::Local => (
                db_url,
                jwt_secret.unwrap_or_else(|| LOCAL_JWT_SECRET.to_string()),
            ),
        };

        let token_ttl_secs = match env::var("TOKEN_TTL_SECS") {
            Ok(value) => match value.parse::<u64>() {
                Ok(ttl) if (1..=MAX_TOKEN_TTL_SECS).contains(&ttl) => ttl,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "TOKEN_TTL_SECS",
                        value,
                    });
                }
            },
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            env,
            db_url,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            seed_demo_users: env::var("APP_SEED").is_ok_and(|v| v == "true" || v == "1"),
            token_ttl_secs,
        })
    }
}
