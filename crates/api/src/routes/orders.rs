//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::instrument;

use online_store_core::OrderId;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireClient;
use crate::models::Order;
use crate::state::AppState;

use super::cart::cart_response;
use super::parse_path_id;

/// Order the client's open cart.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state.orders().create_order(client_id).await?;

    let placed = order.id.to_string();
    add_breadcrumb("orders", "Placed order", Some(&[("order_id", placed.as_str())]));

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the client's orders, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
) -> Result<Json<Vec<Order>>> {
    let orders = state.orders().list_orders(client_id).await?;
    Ok(Json(orders))
}

/// Show the products in one of the client's orders.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
    Path(order_id): Path<String>,
) -> Result<Response> {
    let order_id: OrderId = parse_path_id("orderId", &order_id)?;
    let view = state.orders().order_products(client_id, order_id).await?;
    Ok(cart_response(view))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    use crate::testing::FakeStore;

    use super::*;

    const CLIENT: i32 = 123;

    fn stocked_store() -> Arc<FakeStore> {
        Arc::new(
            FakeStore::new()
                .with_client(CLIENT, "ana")
                .with_product(1, "Guitar", "Music")
                .with_cart(10, CLIENT)
                .with_item(1, 10),
        )
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("clientId", CLIENT.to_string())
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_order() {
        let store = stocked_store();
        let app = crate::app(AppState::new(store.clone()));

        let response = app.oneshot(request("POST", "/api/orders")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["clientId"], 123);
        assert_eq!(json["cartId"], 10);
        assert!(json["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_order_from_empty_cart() {
        let store = Arc::new(
            FakeStore::new()
                .with_client(CLIENT, "ana")
                .with_cart(10, CLIENT),
        );
        let app = crate::app(AppState::new(store.clone()));

        let response = app.oneshot(request("POST", "/api/orders")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_show_order_products() {
        let store = stocked_store();
        let app = crate::app(AppState::new(store.clone()));

        let response = app
            .clone()
            .oneshot(request("POST", "/api/orders"))
            .await
            .unwrap();
        let order_id = body_json(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(request("GET", &format!("/api/orders/{order_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["products"][0]["label"], "Guitar");

        let response = app.oneshot(request("GET", "/api/orders")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_show_unknown_order() {
        let store = stocked_store();
        let app = crate::app(AppState::new(store.clone()));

        let response = app.oneshot(request("GET", "/api/orders/42")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_show_order_bad_path_id() {
        let store = stocked_store();
        let app = crate::app(AppState::new(store.clone()));

        let response = app.oneshot(request("GET", "/api/orders/latest")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.total_calls(), 0);
    }
}
