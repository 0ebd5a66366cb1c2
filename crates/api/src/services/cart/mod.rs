//! Cart workflow.
//!
//! Composes the client check, cart resolution, product lookup and content
//! assembly into the two public operations: reading a client's cart and
//! adding a product to it. Each operation is a linear chain of store calls
//! that stops at the first failure; nothing is retried.

mod clients;
mod contents;
mod error;
mod products;
mod resolver;

pub use clients::ClientValidator;
pub use contents::{CartContents, ContentAssembler};
pub use error::CartError;
pub use products::ProductLookup;
pub use resolver::CartResolver;

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use online_store_core::{ClientId, ProductId};

use crate::db::Store;
use crate::models::{CartItem, Product};

/// A product as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub label: String,
    /// Category label.
    pub category: String,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl From<&Product> for ProductResponse {
    // Only an exact zero means "no weight".
    #[allow(clippy::float_cmp)]
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            label: product.label.clone(),
            category: product.category.label.clone(),
            kind: product.kind,
            download_url: product
                .download_url
                .as_ref()
                .filter(|url| !url.is_empty())
                .cloned(),
            weight: product.weight.filter(|w| *w != 0.0),
        }
    }
}

/// Projection of a cart's contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartView {
    pub products: Vec<ProductResponse>,
    /// Items left out because their product could not be resolved.
    #[serde(skip)]
    pub skipped: usize,
}

impl From<CartContents> for CartView {
    fn from(contents: CartContents) -> Self {
        Self {
            products: contents.products.iter().map(ProductResponse::from).collect(),
            skipped: contents.skipped,
        }
    }
}

/// Cart service.
///
/// Every component shares the store handle passed to [`CartService::new`].
#[derive(Clone)]
pub struct CartService {
    clients: ClientValidator,
    carts: CartResolver,
    products: ProductLookup,
    contents: ContentAssembler,
    store: Arc<dyn Store>,
}

impl CartService {
    /// Create a cart service over a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            clients: ClientValidator::new(Arc::clone(&store)),
            carts: CartResolver::new(Arc::clone(&store)),
            products: ProductLookup::new(Arc::clone(&store)),
            contents: ContentAssembler::new(Arc::clone(&store)),
            store,
        }
    }

    /// Get the products in a client's cart.
    ///
    /// An empty cart yields an empty view, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ClientNotFound` if the client does not exist.
    /// Returns `CartError::CartNotFound` if the client has no open cart.
    /// Returns `CartError::ProductListUnavailable` if the items cannot be listed.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, client_id: ClientId) -> Result<CartView, CartError> {
        self.clients.check(client_id).await?;
        let cart = self.carts.resolve(client_id).await?;
        let contents = self.contents.assemble(cart.id).await?;

        if contents.is_partial() {
            tracing::warn!(
                cart_id = %cart.id,
                skipped = contents.skipped,
                "Cart returned without unresolvable items"
            );
        }

        Ok(contents.into())
    }

    /// Add a product to a client's cart, opening the cart if needed.
    ///
    /// Not idempotent: every call stores a new association.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ClientNotFound` if the client does not exist.
    /// Returns `CartError::CartCreationFailed` if no cart could be found or created.
    /// Returns `CartError::ProductNotFound` if the product is not in the catalog.
    /// Returns `CartError::AssociationFailed` if the association cannot be stored.
    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        product_id: ProductId,
        client_id: ClientId,
    ) -> Result<CartItem, CartError> {
        self.clients.check(client_id).await?;
        let cart = self.carts.get_or_create(client_id).await?;
        let product = self.products.find(product_id).await?;

        let item = self
            .store
            .create_cart_item(product.id, cart.id)
            .await
            .map_err(|source| CartError::AssociationFailed {
                product_id: product.id,
                cart_id: cart.id,
                source,
            })?;

        tracing::info!(cart_id = %cart.id, cart_item_id = %item.id, "Product added to cart");
        Ok(item)
    }
}
