//! Client identification extractor.
//!
//! Every cart and order route acts on behalf of the client named in the
//! `clientId` request header.

use axum::{extract::FromRequestParts, http::request::Parts};

use online_store_core::ClientId;

use crate::error::{AppError, set_sentry_user};

/// The HTTP header carrying the calling client's ID.
///
/// Header names are case-insensitive, so `clientid` and `ClientId` match too.
pub const CLIENT_ID_HEADER: &str = "clientId";

/// Extractor that requires a well-formed `clientId` header.
///
/// Rejects with `400 Bad Request` if the header is missing or is not an
/// integer. Whether the client exists is left to the services.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     RequireClient(client_id): RequireClient,
/// ) -> impl IntoResponse {
///     format!("Hello, client {client_id}!")
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireClient(pub ClientId);

impl<S> FromRequestParts<S> for RequireClient
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .ok_or_else(|| AppError::BadRequest(format!("{CLIENT_ID_HEADER} header is required")))?
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("{CLIENT_ID_HEADER} header is not text")))?;

        let client_id: ClientId = raw.parse().map_err(|_| {
            AppError::BadRequest(format!("{CLIENT_ID_HEADER} header must be an integer"))
        })?;

        tracing::Span::current().record("client_id", client_id.as_i32());
        set_sentry_user(&client_id);

        Ok(Self(client_id))
    }
}
