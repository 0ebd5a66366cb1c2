//! In-memory recording store for unit tests.
//!
//! Counts every call by operation name and can be told to fail specific
//! operations, so tests can assert both outcomes and which store calls
//! were (or were not) made.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use online_store_core::{CartId, CartItemId, CategoryId, ClientId, OrderId, ProductId};

use crate::db::{RepositoryError, Store};
use crate::models::{Cart, CartItem, Category, Client, Order, Product};

#[derive(Default)]
struct FakeState {
    clients: Vec<Client>,
    products: Vec<Product>,
    /// Carts with their closed flag.
    carts: Vec<(Cart, bool)>,
    items: Vec<CartItem>,
    orders: Vec<Order>,
}

impl FakeState {
    fn next_cart_id(&self) -> CartId {
        let max = self.carts.iter().map(|(c, _)| c.id.as_i32()).max();
        CartId::new(max.unwrap_or(0) + 1)
    }

    fn next_item_id(&self) -> CartItemId {
        let max = self.items.iter().map(|i| i.id.as_i32()).max();
        CartItemId::new(max.unwrap_or(0) + 1)
    }

    fn next_order_id(&self) -> OrderId {
        let max = self.orders.iter().map(|o| o.id.as_i32()).max();
        OrderId::new(max.unwrap_or(0) + 1)
    }
}

/// Recording test double for [`Store`].
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failing: HashSet<&'static str>,
    delay: Option<Duration>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(self, id: i32, name: &str) -> Self {
        self.state.lock().unwrap().clients.push(Client {
            id: ClientId::new(id),
            name: name.to_string(),
        });
        self
    }

    pub fn with_product(self, id: i32, label: &str, category: &str) -> Self {
        self.state.lock().unwrap().products.push(Product {
            id: ProductId::new(id),
            category: Category {
                id: CategoryId::new(1),
                label: category.to_string(),
            },
            label: label.to_string(),
            kind: 1,
            download_url: None,
            weight: Some(7.5),
        });
        self
    }

    pub fn with_cart(self, id: i32, client_id: i32) -> Self {
        self.state.lock().unwrap().carts.push((
            Cart {
                id: CartId::new(id),
                client_id: ClientId::new(client_id),
                created_at: Utc::now(),
            },
            false,
        ));
        self
    }

    pub fn with_item(self, product_id: i32, cart_id: i32) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_item_id();
            state.items.push(CartItem {
                id,
                product_id: ProductId::new(product_id),
                cart_id: CartId::new(cart_id),
            });
        }
        self
    }

    /// Make every call to `operation` fail with a database error.
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Delay every call by `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls made to `operation`.
    pub fn calls(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    /// Number of calls made to any operation.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// All carts (open or closed) owned by a client.
    pub fn carts_of(&self, client_id: i32) -> Vec<Cart> {
        self.state
            .lock()
            .unwrap()
            .carts
            .iter()
            .filter(|(c, _)| c.client_id.as_i32() == client_id)
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// All items stored for a cart.
    pub fn items_of(&self, cart_id: i32) -> Vec<CartItem> {
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|i| i.cart_id.as_i32() == cart_id)
            .cloned()
            .collect()
    }

    async fn record(&self, operation: &'static str) -> Result<(), RepositoryError> {
        *self.calls.lock().unwrap().entry(operation).or_insert(0) += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(operation) {
            return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for FakeStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.record("ping").await
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        self.record("find_client").await?;
        let state = self.state.lock().unwrap();
        Ok(state.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn find_cart_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<Cart>, RepositoryError> {
        self.record("find_cart_by_client").await?;
        let state = self.state.lock().unwrap();
        Ok(state
            .carts
            .iter()
            .find(|(c, closed)| c.client_id == client_id && !closed)
            .map(|(c, _)| c.clone()))
    }

    async fn create_cart(&self, client_id: ClientId) -> Result<Cart, RepositoryError> {
        self.record("create_cart").await?;
        let mut state = self.state.lock().unwrap();
        if let Some((open, _)) = state
            .carts
            .iter()
            .find(|(c, closed)| c.client_id == client_id && !closed)
        {
            return Ok(open.clone());
        }
        let cart = Cart {
            id: state.next_cart_id(),
            client_id,
            created_at: Utc::now(),
        };
        state.carts.push((cart.clone(), false));
        Ok(cart)
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.record("find_product").await?;
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_cart_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        self.record("list_cart_items").await?;
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .iter()
            .filter(|i| i.cart_id == cart_id)
            .cloned()
            .collect())
    }

    async fn create_cart_item(
        &self,
        product_id: ProductId,
        cart_id: CartId,
    ) -> Result<CartItem, RepositoryError> {
        self.record("create_cart_item").await?;
        let mut state = self.state.lock().unwrap();
        let item = CartItem {
            id: state.next_item_id(),
            product_id,
            cart_id,
        };
        state.items.push(item.clone());
        Ok(item)
    }

    async fn create_order(
        &self,
        client_id: ClientId,
        cart_id: CartId,
    ) -> Result<Order, RepositoryError> {
        self.record("create_order").await?;
        let mut state = self.state.lock().unwrap();
        let Some(entry) = state
            .carts
            .iter_mut()
            .find(|(c, closed)| c.id == cart_id && c.client_id == client_id && !closed)
        else {
            return Err(RepositoryError::NotFound);
        };
        entry.1 = true;
        let order = Order {
            id: state.next_order_id(),
            client_id,
            cart_id,
            created_at: Utc::now(),
        };
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn find_order(
        &self,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        self.record("find_order").await?;
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .find(|o| o.id == order_id && o.client_id == client_id)
            .cloned())
    }

    async fn list_orders(&self, client_id: ClientId) -> Result<Vec<Order>, RepositoryError> {
        self.record("list_orders").await?;
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .rev()
            .filter(|o| o.client_id == client_id)
            .cloned()
            .collect())
    }
}
