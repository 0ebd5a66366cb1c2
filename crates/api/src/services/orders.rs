//! Order service.
//!
//! Turns a client's open cart into an order and reads an order's products
//! back with the same tolerant assembly as the cart view.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use online_store_core::{CartId, ClientId, OrderId};

use crate::db::{RepositoryError, Store};
use crate::models::Order;
use crate::services::cart::{CartError, CartResolver, CartView, ClientValidator, ContentAssembler};

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Client, cart or content failure shared with the cart workflow.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The cart has no items to order.
    #[error("the cart has no products")]
    EmptyCart(CartId),

    /// No order with this ID was placed by the client.
    #[error("order {order_id} for client id: {client_id} not found")]
    OrderNotFound {
        client_id: ClientId,
        order_id: OrderId,
    },

    /// The order lookup itself failed.
    #[error("unable to look up orders for client {client_id}")]
    OrderLookupFailed {
        client_id: ClientId,
        #[source]
        source: RepositoryError,
    },

    /// The order could not be stored.
    #[error("unable to create order for client id: {client_id}")]
    OrderCreationFailed {
        client_id: ClientId,
        #[source]
        source: RepositoryError,
    },
}

impl OrderError {
    /// The store failure behind this error, if any.
    #[must_use]
    pub const fn store_error(&self) -> Option<&RepositoryError> {
        match self {
            Self::Cart(err) => err.store_error(),
            Self::OrderLookupFailed { source, .. } | Self::OrderCreationFailed { source, .. } => {
                Some(source)
            }
            Self::EmptyCart(_) | Self::OrderNotFound { .. } => None,
        }
    }
}

/// Order service.
#[derive(Clone)]
pub struct OrderService {
    clients: ClientValidator,
    carts: CartResolver,
    contents: ContentAssembler,
    store: Arc<dyn Store>,
}

impl OrderService {
    /// Create an order service over a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            clients: ClientValidator::new(Arc::clone(&store)),
            carts: CartResolver::new(Arc::clone(&store)),
            contents: ContentAssembler::new(Arc::clone(&store)),
            store,
        }
    }

    /// Place an order from the client's open cart.
    ///
    /// The cart is closed, so the client's next added product opens a new one.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Cart` for client, cart and listing failures.
    /// Returns `OrderError::EmptyCart` if the cart has no items.
    /// Returns `OrderError::OrderCreationFailed` if the order cannot be stored.
    #[instrument(skip(self))]
    pub async fn create_order(&self, client_id: ClientId) -> Result<Order, OrderError> {
        self.clients.check(client_id).await?;
        let cart = self.carts.resolve(client_id).await?;

        let items = self.store.list_cart_items(cart.id).await.map_err(|source| {
            CartError::ProductListUnavailable {
                cart_id: cart.id,
                source,
            }
        })?;
        if items.is_empty() {
            return Err(OrderError::EmptyCart(cart.id));
        }

        let order = self
            .store
            .create_order(client_id, cart.id)
            .await
            .map_err(|source| OrderError::OrderCreationFailed { client_id, source })?;

        tracing::info!(
            order_id = %order.id,
            cart_id = %cart.id,
            items = items.len(),
            "Order created"
        );
        Ok(order)
    }

    /// Get the products of an order placed by the client.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Cart` for client and listing failures.
    /// Returns `OrderError::OrderNotFound` if the client placed no such order.
    #[instrument(skip(self))]
    pub async fn order_products(
        &self,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Result<CartView, OrderError> {
        self.clients.check(client_id).await?;

        if !order_id.is_assigned() {
            return Err(OrderError::OrderNotFound {
                client_id,
                order_id,
            });
        }

        let order = self
            .store
            .find_order(client_id, order_id)
            .await
            .map_err(|source| OrderError::OrderLookupFailed { client_id, source })?
            .ok_or(OrderError::OrderNotFound {
                client_id,
                order_id,
            })?;

        let contents = self.contents.assemble(order.cart_id).await?;
        Ok(contents.into())
    }

    /// List the client's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Cart` if the client does not exist.
    /// Returns `OrderError::OrderLookupFailed` if the orders cannot be listed.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, client_id: ClientId) -> Result<Vec<Order>, OrderError> {
        self.clients.check(client_id).await?;

        self.store
            .list_orders(client_id)
            .await
            .map_err(|source| OrderError::OrderLookupFailed { client_id, source })
    }
}
