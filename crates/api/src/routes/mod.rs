//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (store reachable)
//!
//! # Cart (requires clientId header)
//! GET  /api/cart                      - Products in the client's cart
//! POST /api/cart/products/{productId} - Add a product to the client's cart
//!
//! # Orders (requires clientId header)
//! POST /api/orders                    - Order the client's cart
//! GET  /api/orders                    - List the client's orders
//! GET  /api/orders/{orderId}          - Products in one order
//! ```

pub mod cart;
pub mod health;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/products/{product_id}", post(cart::add_product))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{order_id}", get(orders::show))
}

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/cart", cart_routes())
        .nest("/api/orders", order_routes())
}

/// Parse a numeric path segment into a typed ID.
///
/// Path IDs are parsed by hand so a malformed one gets the same JSON error
/// body as every other bad request.
fn parse_path_id<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("{name} must be an integer")))
}
