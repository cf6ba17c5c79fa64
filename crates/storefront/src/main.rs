//! Bazaar Storefront - public marketplace site.
//!
//! This binary serves the buyer-facing JSON API on port 3000.
//!
//! # Architecture
//!
//! - Axum route handlers returning JSON view models for the client shell
//! - tower-sessions in-memory store for per-visitor state (cart, checkout,
//!   language, identity)
//! - Typed `reqwest` client for the marketplace REST backend
//! - Sentry + tracing for error tracking and request logging
//!
//! All durable data lives in the marketplace backend; this process holds
//! nothing worth persisting and can be restarted freely.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, ServiceExt, routing::get};
use sentry::integrations::tracing as sentry_tracing;
use tower::Layer as _;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::state::AppState;
use bazaar_storefront::{middleware, routes};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(std::borrow::Cow::Owned(config.sentry_environment.clone())),
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_storefront=info,tower_http=debug".into());

    // JSON logs in production, human-readable everywhere else
    let fmt_layer = if config.sentry_environment == "production" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Create middleware that needs configuration before the state owns it
    let session_layer = middleware::create_session_layer(&config);
    let cors_layer = cors_layer(&config);

    // Build application state
    let state = AppState::new(config).expect("Failed to initialize application state");

    // Build router
    let router = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .with_state(state.clone())
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Path normalization must run before routing
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    // Start server
    let addr = state.config().socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// CORS for the client shell; credentials ride on the session cookie, so
/// the allowed origin is pinned to the configured public URL.
fn cors_layer(config: &StorefrontConfig) -> CorsLayer {
    let origin = config
        .base_url
        .parse::<HeaderValue>()
        .expect("STOREFRONT_BASE_URL is not a valid header value");

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
