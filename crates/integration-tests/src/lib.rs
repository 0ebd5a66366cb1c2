//! Integration tests for the online store API.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare and seed the database
//! cargo run -p online-store-cli -- migrate
//! cargo run -p online-store-cli -- seed --file crates/cli/catalog.yaml
//!
//! # Start the API, then run the ignored tests
//! cargo run -p online-store-api
//! cargo test -p online-store-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_API_BASE_URL` - API under test (default: `http://localhost:8080`)
//! - `STORE_TEST_CLIENT_ID` - A seeded client (default: 1)
//! - `STORE_TEST_PRODUCT_ID` - A seeded product (default: 1)
//! - `STORE_TEST_SECOND_CLIENT_ID` - Another seeded client, used by tests that
//!   must not share a cart with the others (default: 2)

use reqwest::{Client, RequestBuilder};

/// Header carrying the calling client's ID.
pub const CLIENT_ID_HEADER: &str = "clientId";

/// Shared state for tests against a running server.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub client_id: i32,
    pub second_client_id: i32,
    pub product_id: i32,
}

impl TestContext {
    /// Build a context from the environment.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn from_env() -> Self {
        Self {
            client: Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
            base_url: std::env::var("STORE_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            client_id: env_id("STORE_TEST_CLIENT_ID", 1),
            second_client_id: env_id("STORE_TEST_SECOND_CLIENT_ID", 2),
            product_id: env_id("STORE_TEST_PRODUCT_ID", 1),
        }
    }

    /// Absolute URL for a path on the server under test.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// GET a path as the given client.
    #[must_use]
    pub fn get_as(&self, client_id: i32, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header(CLIENT_ID_HEADER, client_id.to_string())
    }

    /// POST to a path as the given client.
    #[must_use]
    pub fn post_as(&self, client_id: i32, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header(CLIENT_ID_HEADER, client_id.to_string())
    }
}

fn env_id(key: &str, default: i32) -> i32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
