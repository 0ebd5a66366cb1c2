//! Catalog lookups for the cart workflow.

use std::sync::Arc;

use online_store_core::ProductId;

use super::CartError;
use crate::db::Store;
use crate::models::Product;

/// Resolves product IDs to catalog entries.
#[derive(Clone)]
pub struct ProductLookup {
    store: Arc<dyn Store>,
}

impl ProductLookup {
    /// Create a lookup over a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Find a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product is missing or the
    /// lookup fails. Lookup failures are logged before being folded in.
    pub async fn find(&self, product_id: ProductId) -> Result<Product, CartError> {
        if !product_id.is_assigned() {
            return Err(CartError::ProductNotFound(product_id));
        }

        match self.store.find_product(product_id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(CartError::ProductNotFound(product_id)),
            Err(e) => {
                tracing::error!(product_id = %product_id, error = %e, "Product lookup failed");
                Err(CartError::ProductNotFound(product_id))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;

    #[tokio::test]
    async fn test_find_existing_product() {
        let store = Arc::new(FakeStore::new().with_product(123, "Guitar", "Music"));
        let lookup = ProductLookup::new(store.clone());

        let product = lookup.find(ProductId::new(123)).await.unwrap();
        assert_eq!(product.label, "Guitar");
        assert_eq!(product.category.label, "Music");
    }

    #[tokio::test]
    async fn test_missing_and_failing_lookups_are_not_found() {
        let store = Arc::new(FakeStore::new());
        let lookup = ProductLookup::new(store.clone());
        let err = lookup.find(ProductId::new(5)).await.unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(_)));

        let store = Arc::new(FakeStore::new().fail_on("find_product"));
        let lookup = ProductLookup::new(store.clone());
        let err = lookup.find(ProductId::new(5)).await.unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_negative_id_skips_the_store() {
        let store = Arc::new(FakeStore::new());
        let lookup = ProductLookup::new(store.clone());

        let err = lookup.find(ProductId::new(-1)).await.unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(_)));
        assert_eq!(store.total_calls(), 0);
    }
}
