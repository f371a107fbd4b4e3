//! Inkwell web application
//!
//! Wires the `auth` and `blog` routers onto one SQLite pool.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

pub mod config;

use anyhow::Context;
use auth::domain::repository::AuthSessionRepository;
use auth::{AuthAppState, AuthConfig, SqliteAuthRepository, auth_router_generic};
use axum::Router;
use blog::{SqlitePostRepository, blog_router};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tower_http::trace::TraceLayer;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub use config::AppConfig;

/// Open the pool with foreign keys enforced, creating the file if needed
pub async fn connect_database(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid DATABASE_URL {database_url:?}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("failed to open the database")
}

/// Apply migrations and drop expired sessions
///
/// A failed cleanup is logged; it never blocks startup.
pub async fn prepare_database(pool: &SqlitePool) -> anyhow::Result<()> {
    auth::MIGRATOR
        .run(pool)
        .await
        .context("failed to run migrations")?;

    tracing::info!("Migrations completed");

    let auth_store_for_cleanup = SqliteAuthRepository::new(pool.clone());
    if let Err(e) = auth_store_for_cleanup.cleanup_expired_sessions().await {
        tracing::warn!(
            error = %e,
            "Auth session cleanup failed, continuing anyway"
        );
    }

    Ok(())
}

/// Full application router
pub fn build_app(pool: SqlitePool, auth_config: AuthConfig) -> Router {
    let auth_state = AuthAppState::new(SqliteAuthRepository::new(pool.clone()), auth_config);

    Router::new()
        .merge(auth_router_generic(auth_state.clone()))
        .merge(blog_router(SqlitePostRepository::new(pool), auth_state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError {
    AppError::not_found("Page not found.").with_action("Check the address or go back home")
}
