//! Order repository for database operations.
//!
//! Placing an order closes the cart it was placed from, so the client's
//! next "add product" opens a fresh cart.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use online_store_core::{CartId, ClientId, OrderId};

use super::RepositoryError;
use crate::models::Order;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    client_id: ClientId,
    cart_id: CartId,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            cart_id: row.cart_id,
            created_at: row.created_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from a cart and close the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the cart was already ordered.
    /// Returns `RepositoryError::NotFound` if the cart is not open for this client.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        client_id: ClientId,
        cart_id: CartId,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let closed = sqlx::query(
            r"
            UPDATE carts
            SET closed_at = NOW()
            WHERE id = $1 AND client_id = $2 AND closed_at IS NULL
            ",
        )
        .bind(cart_id)
        .bind(client_id)
        .execute(&mut *tx)
        .await?;

        if closed.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (client_id, cart_id)
            VALUES ($1, $2)
            RETURNING id, client_id, cart_id, created_at
            ",
        )
        .bind(client_id)
        .bind(cart_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("cart already ordered".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Get an order, scoped to the client that placed it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_client(
        &self,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, client_id, cart_id, created_at
            FROM orders
            WHERE id = $1 AND client_id = $2
            ",
        )
        .bind(order_id)
        .bind(client_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Order::from))
    }

    /// List a client's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, client_id, cart_id, created_at
            FROM orders
            WHERE client_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(client_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
