//! Server Entry Point
//!
//! Startup only: environment configuration, tracing, database pool,
//! migrations, session cleanup, and serving the assembled router.
//! `anyhow` is confined to this startup path; request-time errors use the
//! per-crate error types.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use auth::PgUserStore;
use base64::Engine;
use base64::engine::general_purpose;
use session::{PgSessionRepository, SessionConfig, SessionManager, SessionRepository};
use snippets::PgSnippetStore;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "web=info,auth=info,session=info,snippets=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        // Bounded waits: exhaustion surfaces as a distinguishable timeout
        // error instead of a hang
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../database/migrations").run(&pool).await?;

    tracing::info!("Migrations completed");

    // Session configuration
    let mut session_config = if cfg!(debug_assertions) {
        SessionConfig::development()
    } else {
        // In production, load the signing secret from the environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to exactly 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        SessionConfig {
            secret,
            ..SessionConfig::default()
        }
    };

    // Opt-out for TLS-terminating local setups
    if env::var("COOKIE_SECURE").as_deref() == Ok("false") {
        session_config.cookie.secure = false;
    }

    // Startup cleanup: remove expired sessions.
    // Errors here should not prevent server startup.
    let session_repo = PgSessionRepository::new(pool.clone());
    match session_repo.cleanup_expired().await {
        Ok(deleted) => {
            tracing::info!(sessions_deleted = deleted, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    let session_manager = SessionManager::new(session_repo, session_config);

    // Build router
    let app = web::router::app_router(
        PgUserStore::new(pool.clone()),
        session_manager,
        PgSnippetStore::new(pool),
    );

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:4000".to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
