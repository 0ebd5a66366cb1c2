//! Database operations for the online store `PostgreSQL`.
//!
//! # Tables
//!
//! - `clients` - End-user accounts (provisioned externally, read-only here)
//! - `categories` - Catalog categories
//! - `products` - Catalog entries (read-only here)
//! - `carts` - One open cart per client, created lazily
//! - `cart_items` - (product, cart) associations, duplicates allowed
//! - `orders` - Checked-out carts
//!
//! # Access
//!
//! Handlers and services never touch the pool directly. They go through the
//! [`Store`] trait, implemented for `PostgreSQL` by [`PgStore`] and wrapped in
//! [`TimeoutStore`] so that no store call can hang a request.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p online-store-cli -- migrate
//! ```

pub mod carts;
pub mod clients;
pub mod orders;
pub mod products;
mod store;
mod timeout;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use store::{PgStore, Store};
pub use timeout::TimeoutStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate order for a cart).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The store did not answer within the configured call timeout.
    #[error("store call `{0}` timed out")]
    Timeout(&'static str),
}

impl RepositoryError {
    /// Whether this error means the store could not be reached in time.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
