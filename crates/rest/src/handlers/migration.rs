//! Migration endpoint handler.

use axum::{extract::State, response::Response};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the file store to document store migration.
///
/// Copies every case of the configured data file into the document store,
/// skipping cases already present. Safe to call repeatedly.
///
/// # HTTP Request
///
/// `POST /api/migrar-datos`
///
/// # Response
///
/// - `200 OK` - `{"message": ..., "migrados": n, "total": m}`
/// - `503 Service Unavailable` - No document store is configured or reachable
/// - `500 Internal Server Error` - The data file could not be read
#[cfg(feature = "mongodb")]
pub async fn migrate_handler(State(state): State<AppState>) -> RestResult<Response> {
    use axum::{Json, http::StatusCode, response::IntoResponse};
    use kuntur_persistence::migration::migrate_file_to_store;

    debug!(path = %state.file_store().path().display(), "Processing migration request");

    let Some(target) = state.document_store() else {
        return Err(document_store_missing());
    };

    let report = migrate_file_to_store(state.file_store(), target)
        .await
        .map_err(|e| RestError::from(e).with_context("Error en la migración"))?;

    tracing::info!(
        migrados = report.migrados,
        total = report.total,
        "Migration request completed"
    );
    Ok((StatusCode::OK, Json(report)).into_response())
}

/// Handler for the migration endpoint in builds without a document store.
#[cfg(not(feature = "mongodb"))]
pub async fn migrate_handler(State(state): State<AppState>) -> RestResult<Response> {
    debug!(path = %state.file_store().path().display(), "Processing migration request");
    Err(document_store_missing())
}

pub(crate) fn document_store_missing() -> RestError {
    RestError::ServiceUnavailable {
        message: "MongoDB no está configurado".to_string(),
    }
}
