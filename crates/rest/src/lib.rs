//! # kuntur-rest - HTTP API for the Kuntur Detector case service
//!
//! This crate exposes the case repository of `kuntur-persistence` over HTTP.
//! Handlers are thin: they decode the request, call one repository
//! operation, and serialize the result.
//!
//! ## Backend Support
//!
//! Storage backends are configured through feature flags:
//!
//! - file store - always available
//! - `mongodb` - MongoDB backend, migration and report endpoints (default)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use kuntur_persistence::backends::file::FileBackend;
//! use kuntur_rest::{ServerConfig, create_app_with_storage};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let backend = Arc::new(FileBackend::new(&config.data_file));
//!
//!     let app = create_app_with_storage(backend, config);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8050").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | docs | GET | `/` |
//! | health | GET | `/healthcheck` |
//! | create | POST | `/api/casos` |
//! | list | GET | `/api/casos?id_caso=&id_alarma=` |
//! | read | GET | `/api/casos/{id_caso}` |
//! | migrate | POST | `/api/migrar-datos` |
//! | reports | GET | `/api/informes` |
//!
//! ## Error Handling
//!
//! All errors are returned as `{"detail": "<message>"}`:
//!
//! | HTTP Status | Description |
//! |-------------|-------------|
//! | 400 | Missing required fields / malformed body |
//! | 404 | Case not found |
//! | 409 | Identifier collision |
//! | 503 | Document store not configured or unreachable |
//! | 500 | Internal server error |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (repository, stores, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use kuntur_persistence::{CaseRepository, CaseStorage};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application over a single storage backend.
///
/// This is a convenience function for file-only setups. To enable the
/// migration and report endpoints, build an [`AppState`] with a document
/// store and use [`create_app`].
pub fn create_app_with_storage(storage: Arc<dyn CaseStorage>, config: ServerConfig) -> Router {
    let state = AppState::new(CaseRepository::new(storage), config);
    create_app(state)
}

/// Creates the Axum application from prepared state.
///
/// This function sets up all routes and the middleware stack (tracing,
/// request timeout, CORS).
pub fn create_app(state: AppState) -> Router {
    info!(
        "Creating REST API server with backend: {}",
        state.repository().backend_name()
    );

    let config = state.config().clone();

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
///
/// Methods and headers are unrestricted; origins follow `cors_origins`.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kds={level},kuntur_rest={level},kuntur_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
