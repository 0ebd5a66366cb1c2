//! Cart lookup and lazy creation.
//!
//! Reading never creates a cart: an absent cart is reported to the caller.
//! Adding a product always ensures one exists first.

use std::sync::Arc;

use online_store_core::ClientId;

use super::CartError;
use crate::db::Store;
use crate::models::Cart;

/// Finds, or on the write path creates, the open cart owned by a client.
#[derive(Clone)]
pub struct CartResolver {
    store: Arc<dyn Store>,
}

impl CartResolver {
    /// Create a resolver over a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Find the client's open cart (read path).
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the client has no open cart.
    /// Returns `CartError::CartLookupFailed` if the lookup fails.
    pub async fn resolve(&self, client_id: ClientId) -> Result<Cart, CartError> {
        self.store
            .find_cart_by_client(client_id)
            .await
            .map_err(|source| CartError::CartLookupFailed { client_id, source })?
            .ok_or(CartError::CartNotFound(client_id))
    }

    /// Find the client's open cart, creating it if absent (write path).
    ///
    /// A failed lookup is not fatal: creation is still attempted, and the
    /// store returns the existing open cart if there was one after all.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartCreationFailed` if both lookup and creation fail.
    pub async fn get_or_create(&self, client_id: ClientId) -> Result<Cart, CartError> {
        match self.store.find_cart_by_client(client_id).await {
            Ok(Some(cart)) => return Ok(cart),
            Ok(None) => {
                tracing::debug!(client_id = %client_id, "No open cart, creating one");
            }
            Err(e) => {
                tracing::warn!(
                    client_id = %client_id,
                    error = %e,
                    "Cart lookup failed, attempting creation"
                );
            }
        }

        let cart = self
            .store
            .create_cart(client_id)
            .await
            .map_err(|source| CartError::CartCreationFailed { client_id, source })?;

        tracing::info!(client_id = %client_id, cart_id = %cart.id, "Cart opened");
        Ok(cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;

    #[tokio::test]
    async fn test_resolve_existing_cart() {
        let store = Arc::new(FakeStore::new().with_client(1, "ana").with_cart(10, 1));
        let resolver = CartResolver::new(store.clone());

        let cart = resolver.resolve(ClientId::new(1)).await.unwrap();
        assert_eq!(cart.id.as_i32(), 10);
    }

    #[tokio::test]
    async fn test_resolve_never_creates() {
        let store = Arc::new(FakeStore::new().with_client(1, "ana"));
        let resolver = CartResolver::new(store.clone());

        let err = resolver.resolve(ClientId::new(1)).await.unwrap_err();
        assert!(matches!(err, CartError::CartNotFound(_)));
        assert_eq!(store.calls("create_cart"), 0);
        assert!(store.carts_of(1).is_empty());
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure() {
        let store = Arc::new(FakeStore::new().fail_on("find_cart_by_client"));
        let resolver = CartResolver::new(store.clone());

        let err = resolver.resolve(ClientId::new(1)).await.unwrap_err();
        assert!(matches!(err, CartError::CartLookupFailed { .. }));
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_open_cart() {
        let store = Arc::new(FakeStore::new().with_client(1, "ana").with_cart(10, 1));
        let resolver = CartResolver::new(store.clone());

        let cart = resolver.get_or_create(ClientId::new(1)).await.unwrap();
        assert_eq!(cart.id.as_i32(), 10);
        assert_eq!(store.calls("create_cart"), 0);
    }

    #[tokio::test]
    async fn test_get_or_create_creates_exactly_one_cart() {
        let store = Arc::new(FakeStore::new().with_client(1, "ana"));
        let resolver = CartResolver::new(store.clone());

        let first = resolver.get_or_create(ClientId::new(1)).await.unwrap();
        let second = resolver.get_or_create(ClientId::new(1)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.carts_of(1).len(), 1);
        assert_eq!(store.calls("create_cart"), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_survives_lookup_failure() {
        let store = Arc::new(
            FakeStore::new()
                .with_client(1, "ana")
                .fail_on("find_cart_by_client"),
        );
        let resolver = CartResolver::new(store.clone());

        let cart = resolver.get_or_create(ClientId::new(1)).await.unwrap();
        assert_eq!(cart.client_id.as_i32(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_fails_when_both_steps_fail() {
        let store = Arc::new(
            FakeStore::new()
                .fail_on("find_cart_by_client")
                .fail_on("create_cart"),
        );
        let resolver = CartResolver::new(store.clone());

        let err = resolver.get_or_create(ClientId::new(1)).await.unwrap_err();
        assert!(matches!(err, CartError::CartCreationFailed { .. }));
    }
}
