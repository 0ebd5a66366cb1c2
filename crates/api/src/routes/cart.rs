//! Cart route handlers.
//!
//! The calling client is taken from the `clientId` header; products are
//! addressed by path.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use online_store_core::ProductId;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireClient;
use crate::services::CartView;
use crate::state::AppState;

use super::parse_path_id;

/// Response header reporting how many cart items were left out of the body.
///
/// Only present when at least one item could not be resolved.
pub const SKIPPED_ITEMS_HEADER: HeaderName = HeaderName::from_static("x-cart-items-skipped");

/// Render a cart view, flagging a partial result in a header.
pub(crate) fn cart_response(view: CartView) -> Response {
    let skipped = view.skipped;
    let mut response = Json(view).into_response();
    if skipped > 0 {
        response
            .headers_mut()
            .insert(SKIPPED_ITEMS_HEADER, HeaderValue::from(skipped));
    }
    response
}

/// Show the products in the client's cart.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
) -> Result<Response> {
    let view = state.carts().get_cart(client_id).await?;
    Ok(cart_response(view))
}

/// Add a product to the client's cart.
///
/// Responds with an empty `200 OK`.
#[instrument(skip(state))]
pub async fn add_product(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
    Path(product_id): Path<String>,
) -> Result<StatusCode> {
    let product_id: ProductId = parse_path_id("productId", &product_id)?;

    let item = state.carts().add_product(product_id, client_id).await?;

    let product = product_id.to_string();
    let cart = item.cart_id.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", product.as_str()), ("cart_id", cart.as_str())]),
    );

    Ok(StatusCode::OK)
}
