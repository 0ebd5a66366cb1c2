//! Product repository for database operations.
//!
//! The catalog is read-only for the HTTP service. The insert helpers are
//! used by `os-cli seed`.

use sqlx::PgPool;

use online_store_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::{Category, Product};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    category_id: CategoryId,
    category_label: String,
    label: String,
    kind: i32,
    download_url: Option<String>,
    weight: Option<f64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            category: Category {
                id: row.category_id,
                label: row.category_label,
            },
            label: row.label,
            kind: row.kind,
            download_url: row.download_url,
            weight: row.weight,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    label: String,
}

/// Parameters for inserting a catalog product.
#[derive(Debug, Clone)]
pub struct NewProduct<'a> {
    pub category_id: CategoryId,
    pub label: &'a str,
    pub kind: i32,
    pub download_url: Option<&'a str>,
    pub weight: Option<f64>,
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product, with its category, by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id, p.category_id, c.label AS category_label,
                   p.label, p.type AS kind, p.download_url, p.weight
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Insert a category by label, or return the existing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_or_get_category(&self, label: &str) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO categories (label)
            VALUES ($1)
            ON CONFLICT (label) DO UPDATE SET label = EXCLUDED.label
            RETURNING id, label
            ",
        )
        .bind(label)
        .fetch_one(self.pool)
        .await?;

        Ok(Category {
            id: row.id,
            label: row.label,
        })
    }

    /// Insert a product, updating it in place if the label already exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, product: &NewProduct<'_>) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO products (category_id, label, type, download_url, weight)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (label) DO UPDATE
            SET category_id = EXCLUDED.category_id,
                type = EXCLUDED.type,
                download_url = EXCLUDED.download_url,
                weight = EXCLUDED.weight
            RETURNING id
            ",
        )
        .bind(product.category_id)
        .bind(product.label)
        .bind(product.kind)
        .bind(product.download_url)
        .bind(product.weight)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
