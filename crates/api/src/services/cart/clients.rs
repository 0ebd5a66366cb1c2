//! Client existence checks.

use std::sync::Arc;

use online_store_core::ClientId;

use super::CartError;
use crate::db::{RepositoryError, Store};

/// Checks that a client exists before any cart work starts.
#[derive(Clone)]
pub struct ClientValidator {
    store: Arc<dyn Store>,
}

impl ClientValidator {
    /// Create a validator over a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Whether a client with this ID exists.
    ///
    /// IDs that can never have been assigned answer `false` without a
    /// store round trip.
    ///
    /// # Errors
    ///
    /// Returns the store error if the lookup fails, so that an unreachable
    /// store is never reported as a missing client.
    pub async fn exists(&self, client_id: ClientId) -> Result<bool, RepositoryError> {
        if !client_id.is_assigned() {
            return Ok(false);
        }
        Ok(self.store.find_client(client_id).await?.is_some())
    }

    /// Require the client to exist.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ClientNotFound` if the client does not exist.
    /// Returns `CartError::ClientLookupFailed` if the lookup fails.
    pub async fn check(&self, client_id: ClientId) -> Result<(), CartError> {
        match self.exists(client_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(CartError::ClientNotFound(client_id)),
            Err(source) => Err(CartError::ClientLookupFailed { client_id, source }),
        }
    }
}
