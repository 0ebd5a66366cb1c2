//! Client repository for database operations.
//!
//! Clients are provisioned by an external process. The service only checks
//! that they exist; `create_or_get` exists for catalog seeding.

use sqlx::PgPool;

use online_store_core::ClientId;

use super::RepositoryError;
use crate::models::Client;

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: ClientId,
    name: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a client by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            SELECT id, name
            FROM clients
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Client::from))
    }

    /// Insert a client by name, or return the existing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_or_get(&self, name: &str) -> Result<Client, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            INSERT INTO clients (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
