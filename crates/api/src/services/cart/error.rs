//! Cart workflow error types.

use thiserror::Error;

use online_store_core::{CartId, ClientId, ProductId};

use crate::db::RepositoryError;

/// Errors that can occur while reading or changing a cart.
///
/// Every variant ends the current request. The only failure recovered
/// locally (a cart item whose product no longer resolves) never surfaces
/// here; it is counted in `CartContents::skipped` instead.
#[derive(Debug, Error)]
pub enum CartError {
    /// No client with this ID exists.
    #[error("client with id: {0} not found")]
    ClientNotFound(ClientId),

    /// The client lookup itself failed, so existence is unknown.
    #[error("unable to look up client {client_id}")]
    ClientLookupFailed {
        client_id: ClientId,
        #[source]
        source: RepositoryError,
    },

    /// The client has no open cart (read path only).
    #[error("cart for client id: {0} not found")]
    CartNotFound(ClientId),

    /// The cart lookup itself failed (read path only).
    #[error("unable to look up cart for client {client_id}")]
    CartLookupFailed {
        client_id: ClientId,
        #[source]
        source: RepositoryError,
    },

    /// No cart existed and one could not be created (write path only).
    #[error("unable to create cart for client {client_id}")]
    CartCreationFailed {
        client_id: ClientId,
        #[source]
        source: RepositoryError,
    },

    /// The product does not resolve to a catalog entry.
    #[error("product {0} not found in catalog")]
    ProductNotFound(ProductId),

    /// The cart's items could not be enumerated.
    #[error("unable to retrieve the list of products for cart {cart_id}")]
    ProductListUnavailable {
        cart_id: CartId,
        #[source]
        source: RepositoryError,
    },

    /// The (product, cart) association could not be stored.
    #[error("unable to add product {product_id} to cart {cart_id}")]
    AssociationFailed {
        product_id: ProductId,
        cart_id: CartId,
        #[source]
        source: RepositoryError,
    },
}

impl CartError {
    /// The store failure behind this error, if any.
    #[must_use]
    pub const fn store_error(&self) -> Option<&RepositoryError> {
        match self {
            Self::ClientLookupFailed { source, .. }
            | Self::CartLookupFailed { source, .. }
            | Self::CartCreationFailed { source, .. }
            | Self::ProductListUnavailable { source, .. }
            | Self::AssociationFailed { source, .. } => Some(source),
            Self::ClientNotFound(_) | Self::CartNotFound(_) | Self::ProductNotFound(_) => None,
        }
    }

    /// Whether the caller asked for something that does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClientNotFound(_) | Self::CartNotFound(_) | Self::ProductNotFound(_)
        )
    }
}
