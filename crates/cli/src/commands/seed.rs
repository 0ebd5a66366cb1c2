//! Seed the database with clients and a product catalog.
//!
//! Reads a YAML catalog and inserts its entries. Seeding is idempotent:
//! clients are matched by name and categories and products by label, so
//! running it twice updates rows instead of duplicating them.
//!
//! # File Format
//!
//! ```yaml
//! clients:
//!   - name: ana
//! categories:
//!   - label: Music
//! products:
//!   - label: Guitar
//!     category: Music
//!     type: 1
//!     weight: 7.5
//!   - label: Rust Ebook
//!     category: Books
//!     type: 2
//!     downloadUrl: https://example.com/rust.epub
//! ```
//!
//! Categories named by a product need not be listed under `categories`.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use online_store_api::db::{
    self, RepositoryError,
    clients::ClientRepository,
    products::{NewProduct, ProductRepository},
};
use online_store_core::CategoryId;

use super::{DATABASE_URL_VAR, database_url};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0} validation errors found")]
    Invalid(usize),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A seed catalog file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Catalog {
    pub clients: Vec<ClientSeed>,
    pub categories: Vec<CategorySeed>,
    pub products: Vec<ProductSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSeed {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySeed {
    pub label: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductSeed {
    pub label: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: i32,
    pub download_url: Option<String>,
    pub weight: Option<f64>,
}

impl Catalog {
    /// Every category label used by the catalog, listed or referenced.
    #[must_use]
    pub fn category_labels(&self) -> BTreeSet<&str> {
        self.categories
            .iter()
            .map(|c| c.label.as_str())
            .chain(self.products.iter().map(|p| p.category.as_str()))
            .collect()
    }
}

/// Rows written by a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub categories: usize,
    pub products: usize,
}

/// Check a catalog for problems the database would not catch.
///
/// Returns one message per problem; an empty list means the catalog is valid.
#[must_use]
pub fn validate(catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for client in &catalog.clients {
        if client.name.trim().is_empty() {
            errors.push("client with empty name".to_string());
        } else if !names.insert(client.name.as_str()) {
            errors.push(format!("duplicate client name: {}", client.name));
        }
    }

    for category in &catalog.categories {
        if category.label.trim().is_empty() {
            errors.push("category with empty label".to_string());
        }
    }

    let mut labels = HashSet::new();
    for product in &catalog.products {
        if product.label.trim().is_empty() {
            errors.push("product with empty label".to_string());
            continue;
        }
        if !labels.insert(product.label.as_str()) {
            errors.push(format!("duplicate product label: {}", product.label));
        }
        if product.category.trim().is_empty() {
            errors.push(format!("product {} has no category", product.label));
        }
        if product.weight.is_some_and(|w| w < 0.0) {
            errors.push(format!("product {} has a negative weight", product.label));
        }
    }

    errors
}

/// Seed the catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog
/// * `dry_run` - If true, parse and validate only
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or is invalid, the
/// database URL is missing, or a database operation fails.
pub async fn catalog(file_path: &str, dry_run: bool) -> Result<SeedSummary, SeedError> {
    // Verify file exists
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_string()));
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: Catalog = serde_yaml::from_str(&content)?;

    let errors = validate(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(SeedError::Invalid(errors.len()));
    }

    info!(
        clients = catalog.clients.len(),
        products = catalog.products.len(),
        "Catalog validated successfully"
    );

    if dry_run {
        return Ok(SeedSummary::default());
    }

    let url = database_url().ok_or(SeedError::MissingEnvVar(DATABASE_URL_VAR))?;
    let pool = db::create_pool(&url).await?;
    info!("Connected to database");

    let clients = ClientRepository::new(&pool);
    for seed in &catalog.clients {
        let client = clients.create_or_get(&seed.name).await?;
        info!(client_id = %client.id, name = %client.name, "Client seeded");
    }

    let products = ProductRepository::new(&pool);
    let mut category_ids: HashMap<&str, CategoryId> = HashMap::new();
    for label in catalog.category_labels() {
        let category = products.create_or_get_category(label).await?;
        category_ids.insert(label, category.id);
    }

    for seed in &catalog.products {
        let Some(&category_id) = category_ids.get(seed.category.as_str()) else {
            continue;
        };
        let id = products
            .upsert(&NewProduct {
                category_id,
                label: &seed.label,
                kind: seed.kind,
                download_url: seed.download_url.as_deref(),
                weight: seed.weight,
            })
            .await?;
        info!(product_id = %id, label = %seed.label, "Product seeded");
    }

    Ok(SeedSummary {
        clients: catalog.clients.len(),
        categories: category_ids.len(),
        products: catalog.products.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
clients:
  - name: ana
  - name: bruno
categories:
  - label: Music
products:
  - label: Guitar
    category: Music
    type: 1
    weight: 7.5
  - label: Rust Ebook
    category: Books
    type: 2
    downloadUrl: https://example.com/rust.epub
";

    #[test]
    fn test_parse_catalog() {
        let catalog: Catalog = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(catalog.clients.len(), 2);
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[0].kind, 1);
        assert_eq!(
            catalog.products[1].download_url.as_deref(),
            Some("https://example.com/rust.epub")
        );
        assert!(validate(&catalog).is_empty());
    }

    #[test]
    fn test_referenced_categories_are_collected() {
        let catalog: Catalog = serde_yaml::from_str(SAMPLE).unwrap();
        let labels: Vec<_> = catalog.category_labels().into_iter().collect();
        assert_eq!(labels, ["Books", "Music"]);
    }

    #[test]
    fn test_sections_are_optional() {
        let catalog: Catalog = serde_yaml::from_str("clients:\n  - name: ana\n").unwrap();
        assert!(catalog.products.is_empty());
        assert!(validate(&catalog).is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_yaml::from_str::<Catalog>("clients:\n  - name: ana\n    email: a@b.c\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_problems() {
        let catalog: Catalog = serde_yaml::from_str(
            r"
clients:
  - name: ana
  - name: ana
products:
  - label: Guitar
    category: Music
    type: 1
    weight: -1.0
  - label: Guitar
    category: ''
    type: 1
",
        )
        .unwrap();

        let errors = validate(&catalog);
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("duplicate client name")));
        assert!(errors.iter().any(|e| e.contains("negative weight")));
        assert!(errors.iter().any(|e| e.contains("duplicate product label")));
        assert!(errors.iter().any(|e| e.contains("no category")));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = catalog("does/not/exist.yaml", true).await.unwrap_err();
        assert!(matches!(err, SeedError::FileNotFound(_)));
    }
}
