//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; the response body is always `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{CartError, OrderError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart workflow failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Order operation failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// How a failure should be reported to the client.
enum Class {
    /// The caller asked for something that does not exist or is invalid.
    Client(StatusCode),
    /// The store answered with an error.
    Server,
    /// The store did not answer in time.
    Timeout,
}

impl AppError {
    fn class(&self) -> Class {
        let store_error = match self {
            Self::Cart(err) if err.is_not_found() => return Class::Client(StatusCode::NOT_FOUND),
            Self::Cart(err) => err.store_error(),
            Self::Order(OrderError::Cart(err)) if err.is_not_found() => {
                return Class::Client(StatusCode::NOT_FOUND);
            }
            Self::Order(OrderError::OrderNotFound { .. }) => {
                return Class::Client(StatusCode::NOT_FOUND);
            }
            Self::Order(OrderError::EmptyCart(_)) => return Class::Client(StatusCode::CONFLICT),
            Self::Order(err) => err.store_error(),
            Self::BadRequest(_) => return Class::Client(StatusCode::BAD_REQUEST),
        };

        if store_error.is_some_and(RepositoryError::is_timeout) {
            Class::Timeout
        } else {
            Class::Server
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.class() {
            Class::Client(status) => (status, self.to_string()),
            Class::Server => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Class::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Upstream store timed out".to_string(),
            ),
        };

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                source = ?std::error::Error::source(&self).map(ToString::to_string),
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a client ID.
///
/// Associates errors raised while serving a request with the calling client.
pub fn set_sentry_user(client_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(client_id.to_string()),
            ..Default::default()
        }));
    });
}

/// Add a breadcrumb for client actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
