use campus_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    repository::{InMemoryRepository, PostgresRepository, RepositoryState},
    seed::seed_demo_users,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, the user store, optional seeding, then the
/// HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail fast on an incomplete production environment)
    dotenv::dotenv().ok();
    let config = AppConfig::load().expect("FATAL: invalid configuration");

    // 2. Logging: RUST_LOG wins, otherwise verbose defaults for local work.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_portal=debug,tower_http=info,axum=trace".into());

    // Pretty output locally, JSON for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. User store: Postgres when configured, in-memory otherwise (local only;
    //    production config always carries a DATABASE_URL).
    let repo: RepositoryState = match &config.db_url {
        Some(db_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(db_url)
                .await
                .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

            let postgres = PostgresRepository::new(pool);
            postgres
                .migrate()
                .await
                .expect("FATAL: Failed to apply database migrations.");
            Arc::new(postgres)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory user store");
            Arc::new(InMemoryRepository::new())
        }
    };

    // 4. Demo users
    if config.seed_demo_users {
        seed_demo_users(repo.as_ref())
            .await
            .expect("FATAL: Failed to seed demo users.");
    }

    // 5. Router and server
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState { repo, config });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
