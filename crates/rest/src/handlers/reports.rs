//! Report listing handler.

use axum::{extract::State, response::Response};
use tracing::debug;

use crate::error::RestResult;
use crate::handlers::migration::document_store_missing;
use crate::state::AppState;

/// Handler for listing the reports held next to the case collection.
///
/// # HTTP Request
///
/// `GET /api/informes`
///
/// # Response
///
/// - `200 OK` - JSON array of report documents, `_id` as a string
/// - `503 Service Unavailable` - No document store is configured or reachable
#[cfg(feature = "mongodb")]
pub async fn reports_handler(State(state): State<AppState>) -> RestResult<Response> {
    use axum::{Json, http::StatusCode, response::IntoResponse};

    use crate::error::RestError;

    debug!("Processing report listing request");

    let Some(store) = state.document_store() else {
        return Err(document_store_missing());
    };

    let reports = store
        .list_reports()
        .await
        .map_err(|e| RestError::from(e).with_context("Error al obtener informes"))?;

    Ok((StatusCode::OK, Json(reports)).into_response())
}

/// Handler for report listing in builds without a document store.
#[cfg(not(feature = "mongodb"))]
pub async fn reports_handler(State(_state): State<AppState>) -> RestResult<Response> {
    debug!("Processing report listing request");
    Err(document_store_missing())
}
