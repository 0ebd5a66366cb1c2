//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::Store;
use crate::services::{CartService, OrderService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the store handle and the services built on it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn Store>,
    carts: CartService,
    orders: OrderService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Store handle shared by every service
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                carts: CartService::new(Arc::clone(&store)),
                orders: OrderService::new(Arc::clone(&store)),
                store,
            }),
        }
    }

    /// Get a reference to the store handle.
    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn carts(&self) -> &CartService {
        &self.inner.carts
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }
}
