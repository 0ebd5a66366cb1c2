//! Per-call deadline for store access.
//!
//! Wraps any [`Store`] so every call is bounded by `tokio::time::timeout`.
//! Cancellation needs no extra plumbing: when axum drops a request future
//! (client disconnect, shutdown), the in-flight store future is dropped too.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use online_store_core::{CartId, ClientId, OrderId, ProductId};

use super::{RepositoryError, Store};
use crate::models::{Cart, CartItem, Client, Order, Product};

/// A [`Store`] decorator that fails calls exceeding a fixed deadline.
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: Store> TimeoutStore<S> {
    /// Wrap `inner`, bounding each call by `timeout`.
    #[must_use]
    pub const fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    #[cfg(test)]
    const fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        if let Ok(result) = tokio::time::timeout(self.timeout, call).await {
            result
        } else {
            tracing::warn!(
                operation,
                timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                "Store call timed out"
            );
            Err(RepositoryError::Timeout(operation))
        }
    }
}

#[async_trait]
impl<S: Store> Store for TimeoutStore<S> {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.bounded("ping", self.inner.ping()).await
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        self.bounded("find_client", self.inner.find_client(id)).await
    }

    async fn find_cart_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<Cart>, RepositoryError> {
        self.bounded(
            "find_cart_by_client",
            self.inner.find_cart_by_client(client_id),
        )
        .await
    }

    async fn create_cart(&self, client_id: ClientId) -> Result<Cart, RepositoryError> {
        self.bounded("create_cart", self.inner.create_cart(client_id))
            .await
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.bounded("find_product", self.inner.find_product(id)).await
    }

    async fn list_cart_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        self.bounded("list_cart_items", self.inner.list_cart_items(cart_id))
            .await
    }

    async fn create_cart_item(
        &self,
        product_id: ProductId,
        cart_id: CartId,
    ) -> Result<CartItem, RepositoryError> {
        self.bounded(
            "create_cart_item",
            self.inner.create_cart_item(product_id, cart_id),
        )
        .await
    }

    async fn create_order(
        &self,
        client_id: ClientId,
        cart_id: CartId,
    ) -> Result<Order, RepositoryError> {
        self.bounded("create_order", self.inner.create_order(client_id, cart_id))
            .await
    }

    async fn find_order(
        &self,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        self.bounded("find_order", self.inner.find_order(client_id, order_id))
            .await
    }

    async fn list_orders(&self, client_id: ClientId) -> Result<Vec<Order>, RepositoryError> {
        self.bounded("list_orders", self.inner.list_orders(client_id))
            .await
    }
}
