//! Domain models for the online store.
//!
//! These types represent validated domain objects separate from database
//! row types (see `crate::db`) and from HTTP response projections
//! (see `crate::services::cart::ProductResponse`).

use chrono::{DateTime, Utc};
use serde::Serialize;

use online_store_core::{CartId, CartItemId, CategoryId, ClientId, OrderId, ProductId};

/// An end-user account.
///
/// Clients are provisioned outside this service; it only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
}

/// Catalog category a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

/// A catalog entry describing a purchasable item.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub category: Category,
    pub label: String,
    /// Product type code (physical, downloadable, ...).
    pub kind: i32,
    /// Download location for digital products.
    pub download_url: Option<String>,
    /// Shipping weight for physical products.
    pub weight: Option<f64>,
}

/// The open collection of product associations belonging to one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub client_id: ClientId,
    pub created_at: DateTime<Utc>,
}

/// One (product, cart) association row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub cart_id: CartId,
}

/// A cart that has been checked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub client_id: ClientId,
    pub cart_id: CartId,
    pub created_at: DateTime<Utc>,
}
