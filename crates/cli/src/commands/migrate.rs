//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! os-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded at build time:
//! ```text
//! migrations/
//! ├── 20260301000001_create_catalog.sql
//! ├── 20260301000002_create_carts.sql
//! └── 20260301000003_create_orders.sql
//! ```

use thiserror::Error;

use online_store_api::db;

use super::{DATABASE_URL_VAR, database_url};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let url = database_url().ok_or(MigrationError::MissingEnvVar(DATABASE_URL_VAR))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
