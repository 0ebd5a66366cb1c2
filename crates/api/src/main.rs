//! Online store cart API.
//!
//! This binary serves the cart and order API on port 8080.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON
//! - `PostgreSQL` for clients, catalog, carts and orders
//! - Every store call bounded by `STORE_CALL_TIMEOUT_MS`
//!
//! Clients identify themselves with the `clientId` request header; there is
//! no authentication layer in this service.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use online_store_api::config::{ApiConfig, LogFormat};
use online_store_api::db::{self, PgStore, TimeoutStore};
use online_store_api::state::AppState;

/// Start Sentry when a DSN is configured.
///
/// The returned guard flushes pending events on drop, so it must live as
/// long as the server.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Into::into),
        sample_rate: config.sentry_sample_rate,
        traces_sample_rate: config.sentry_traces_sample_rate,
        attach_stacktrace: true,
        ..Default::default()
    };

    Some(sentry::init((dsn, options)))
}

/// Route tracing events to Sentry: warnings and errors become events,
/// info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. JSON output emits one flattened
/// object per event.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "online_store_api=info,tower_http=debug".into());

    let json_layer = (format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (format == LogFormat::Pretty).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Sentry first, so the tracing layer below has a client to report to
    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p online-store-cli -- migrate
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!(
        call_timeout_ms = u64::try_from(config.store_timeout.as_millis()).unwrap_or(u64::MAX),
        "Database pool created"
    );

    let store = TimeoutStore::new(PgStore::new(pool), config.store_timeout);
    let state = AppState::new(Arc::new(store));

    let app = online_store_api::app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    drop(sentry_guard);
}

/// Resolve once Ctrl+C or (on unix) SIGTERM arrives.
///
/// If a handler cannot be installed the server keeps running and only the
/// other signal can stop it.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
