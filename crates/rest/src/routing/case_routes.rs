//! Case service route configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Creates all routes of the case API.
///
/// # Routes
///
/// - `GET /` - Documentation page
/// - `GET /healthcheck` - Health check
/// - `POST /api/casos` - Create a case
/// - `GET /api/casos` - List cases (`id_caso`, `id_alarma` filters)
/// - `GET /api/casos/{id_caso}` - Read a case
/// - `POST /api/migrar-datos` - Migrate the file store into MongoDB
/// - `GET /api/informes` - List reports
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/healthcheck", get(handlers::health_handler))
        .route(
            "/api/casos",
            get(handlers::list_cases_handler).post(handlers::create_case_handler),
        )
        .route("/api/casos/{id_caso}", get(handlers::get_case_handler))
        .route("/api/migrar-datos", post(handlers::migrate_handler))
        .route("/api/informes", get(handlers::reports_handler))
        .with_state(state)
}
