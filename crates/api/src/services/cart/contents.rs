//! Cart content assembly.
//!
//! Two failure tiers: if the cart's items cannot be listed the whole
//! assembly fails, but an item whose product no longer resolves is logged
//! and skipped.

use std::sync::Arc;

use online_store_core::CartId;

use super::{CartError, ProductLookup};
use crate::db::Store;
use crate::models::Product;

/// Products reachable from a cart, in item order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartContents {
    /// Resolved products, one per resolvable item (duplicates included).
    pub products: Vec<Product>,
    /// Items dropped because their product could not be resolved.
    pub skipped: usize,
}

impl CartContents {
    /// Whether any item was dropped.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.skipped > 0
    }
}

/// Gathers a cart's items and resolves each to its product.
#[derive(Clone)]
pub struct ContentAssembler {
    store: Arc<dyn Store>,
    products: ProductLookup,
}

impl ContentAssembler {
    /// Create an assembler over a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            products: ProductLookup::new(Arc::clone(&store)),
            store,
        }
    }

    /// List the products in a cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductListUnavailable` if the cart's items
    /// cannot be listed. No product lookups happen in that case.
    pub async fn assemble(&self, cart_id: CartId) -> Result<CartContents, CartError> {
        let items = self
            .store
            .list_cart_items(cart_id)
            .await
            .map_err(|source| CartError::ProductListUnavailable { cart_id, source })?;

        let mut contents = CartContents {
            products: Vec::with_capacity(items.len()),
            skipped: 0,
        };

        for item in items {
            match self.products.find(item.product_id).await {
                Ok(product) => contents.products.push(product),
                Err(e) => {
                    tracing::warn!(
                        cart_id = %cart_id,
                        cart_item_id = %item.id,
                        product_id = %item.product_id,
                        error = %e,
                        "Skipping cart item with unresolvable product"
                    );
                    contents.skipped += 1;
                }
            }
        }

        Ok(contents)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;

    #[tokio::test]
    async fn test_empty_cart() {
        let store = Arc::new(FakeStore::new().with_cart(1, 1));
        let assembler = ContentAssembler::new(store.clone());

        let contents = assembler.assemble(CartId::new(1)).await.unwrap();
        assert!(contents.products.is_empty());
        assert!(!contents.is_partial());
    }

    #[tokio::test]
    async fn test_preserves_item_order_and_duplicates() {
        let store = Arc::new(
            FakeStore::new()
                .with_product(1, "Guitar", "Music")
                .with_product(2, "Ebook", "Books")
                .with_cart(7, 1)
                .with_item(2, 7)
                .with_item(1, 7)
                .with_item(2, 7),
        );
        let assembler = ContentAssembler::new(store.clone());

        let contents = assembler.assemble(CartId::new(7)).await.unwrap();
        let labels: Vec<_> = contents.products.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Ebook", "Guitar", "Ebook"]);
    }

    #[tokio::test]
    async fn test_dangling_item_is_skipped() {
        let store = Arc::new(
            FakeStore::new()
                .with_product(1, "Guitar", "Music")
                .with_cart(7, 1)
                .with_item(1, 7)
                .with_item(2, 7),
        );
        let assembler = ContentAssembler::new(store.clone());

        let contents = assembler.assemble(CartId::new(7)).await.unwrap();
        assert_eq!(contents.products.len(), 1);
        assert_eq!(contents.products[0].id.as_i32(), 1);
        assert_eq!(contents.skipped, 1);
        assert!(contents.is_partial());
    }

    #[tokio::test]
    async fn test_product_lookup_errors_are_skipped() {
        let store = Arc::new(
            FakeStore::new()
                .with_product(1, "Guitar", "Music")
                .with_cart(7, 1)
                .with_item(1, 7)
                .fail_on("find_product"),
        );
        let assembler = ContentAssembler::new(store.clone());

        let contents = assembler.assemble(CartId::new(7)).await.unwrap();
        assert!(contents.products.is_empty());
        assert_eq!(contents.skipped, 1);
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_before_product_lookups() {
        let store = Arc::new(
            FakeStore::new()
                .with_product(1, "Guitar", "Music")
                .with_cart(7, 1)
                .with_item(1, 7)
                .fail_on("list_cart_items"),
        );
        let assembler = ContentAssembler::new(store.clone());

        let err = assembler.assemble(CartId::new(7)).await.unwrap_err();
        assert!(matches!(err, CartError::ProductListUnavailable { .. }));
        assert_eq!(store.calls("find_product"), 0);
    }
}
