//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! The calling client is identified per handler by the [`RequireClient`]
//! extractor rather than by a layer.

pub mod client;
pub mod request_id;

pub use client::{CLIENT_ID_HEADER, RequireClient};
pub use request_id::request_id_middleware;
