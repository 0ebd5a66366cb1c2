//! Cart repository for database operations.
//!
//! A client has at most one open cart (`closed_at IS NULL`). The partial
//! unique index on `carts (client_id)` enforces this, and [`CartRepository::create`]
//! leans on it so that racing first-time adds converge on a single row.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use online_store_core::{CartId, CartItemId, ClientId, ProductId};

use super::RepositoryError;
use crate::models::{Cart, CartItem};

#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: CartId,
    client_id: ClientId,
    created_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    product_id: ProductId,
    cart_id: CartId,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            cart_id: row.cart_id,
        }
    }
}

/// Repository for cart and cart item database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the open cart for a client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_open_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, client_id, created_at
            FROM carts
            WHERE client_id = $1 AND closed_at IS NULL
            ",
        )
        .bind(client_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    /// Create an open cart for a client.
    ///
    /// If another request opened one first, that cart is returned instead;
    /// the no-op `DO UPDATE` is what makes `RETURNING` yield the existing row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (e.g. the
    /// client row does not exist).
    pub async fn create(&self, client_id: ClientId) -> Result<Cart, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            INSERT INTO carts (client_id)
            VALUES ($1)
            ON CONFLICT (client_id) WHERE closed_at IS NULL
            DO UPDATE SET client_id = EXCLUDED.client_id
            RETURNING id, client_id, created_at
            ",
        )
        .bind(client_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List the items of a cart in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT id, product_id, cart_id
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    /// Associate a product with a cart.
    ///
    /// Duplicates are allowed: adding the same product twice yields two rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_item(
        &self,
        product_id: ProductId,
        cart_id: CartId,
    ) -> Result<CartItem, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            INSERT INTO cart_items (product_id, cart_id)
            VALUES ($1, $2)
            RETURNING id, product_id, cart_id
            ",
        )
        .bind(product_id)
        .bind(cart_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
