use crate::models::{NewUser, User};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// RepositoryError
///
/// Failures of the persistence layer. Handlers and extractors map these to `500`.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Repository Trait
///
/// The contract for the user table. The access gate never touches it directly; the
/// identity provider reads a user's role through it before the gate runs.
///
/// **Send + Sync + async_trait** keep `Arc<dyn Repository>` usable across Axum's
/// task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    /// Idempotent on email: an existing row with the same email is returned unchanged.
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL. Queries are checked at runtime so the crate
/// builds without a live database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on conflict.
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, name, email, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}

/// InMemoryRepository
///
/// Process-local user store. Used by the test suites and as the local fallback
/// when no `DATABASE_URL` is configured.
#[derive(Default)]
pub struct InMemoryRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with the given rows, as-is. Unlike `create_user`
    /// this does not go through `Role`, so it can hold labels outside the known set.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.values().find(|u| u.email == new_user.email) {
            return Ok(existing.clone());
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role.as_str().to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}
