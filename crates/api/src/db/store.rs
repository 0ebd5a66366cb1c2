//! The store capability set used by the cart and order services.

use async_trait::async_trait;
use sqlx::PgPool;

use online_store_core::{CartId, ClientId, OrderId, ProductId};

use super::RepositoryError;
use super::carts::CartRepository;
use super::clients::ClientRepository;
use super::orders::OrderRepository;
use super::products::ProductRepository;
use crate::models::{Cart, CartItem, Client, Order, Product};

/// Record lookups and inserts the services depend on.
///
/// Each method is a single store round trip. Services receive an
/// `Arc<dyn Store>` at construction, so tests can substitute a recording
/// double for the `PostgreSQL` implementation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Find a client by ID.
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, RepositoryError>;

    /// Find the open cart owned by a client.
    async fn find_cart_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<Cart>, RepositoryError>;

    /// Open a cart for a client, returning the already-open one if it exists.
    async fn create_cart(&self, client_id: ClientId) -> Result<Cart, RepositoryError>;

    /// Find a product, with its category, by ID.
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// List the associations of a cart in insertion order.
    async fn list_cart_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError>;

    /// Associate a product with a cart.
    async fn create_cart_item(
        &self,
        product_id: ProductId,
        cart_id: CartId,
    ) -> Result<CartItem, RepositoryError>;

    /// Turn an open cart into an order, closing the cart.
    async fn create_order(
        &self,
        client_id: ClientId,
        cart_id: CartId,
    ) -> Result<Order, RepositoryError>;

    /// Find an order placed by a client.
    async fn find_order(
        &self,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Result<Option<Order>, RepositoryError>;

    /// List the orders placed by a client.
    async fn list_orders(&self, client_id: ClientId) -> Result<Vec<Order>, RepositoryError>;
}

/// `PostgreSQL`-backed [`Store`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        ClientRepository::new(&self.pool).get_by_id(id).await
    }

    async fn find_cart_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<Cart>, RepositoryError> {
        CartRepository::new(&self.pool)
            .get_open_by_client(client_id)
            .await
    }

    async fn create_cart(&self, client_id: ClientId) -> Result<Cart, RepositoryError> {
        CartRepository::new(&self.pool).create(client_id).await
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).get_by_id(id).await
    }

    async fn list_cart_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        CartRepository::new(&self.pool).list_items(cart_id).await
    }

    async fn create_cart_item(
        &self,
        product_id: ProductId,
        cart_id: CartId,
    ) -> Result<CartItem, RepositoryError> {
        CartRepository::new(&self.pool)
            .add_item(product_id, cart_id)
            .await
    }

    async fn create_order(
        &self,
        client_id: ClientId,
        cart_id: CartId,
    ) -> Result<Order, RepositoryError> {
        OrderRepository::new(&self.pool)
            .create(client_id, cart_id)
            .await
    }

    async fn find_order(
        &self,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        OrderRepository::new(&self.pool)
            .get_for_client(client_id, order_id)
            .await
    }

    async fn list_orders(&self, client_id: ClientId) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(&self.pool)
            .list_for_client(client_id)
            .await
    }
}
