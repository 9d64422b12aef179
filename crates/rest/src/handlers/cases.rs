//! Case endpoint handlers.
//!
//! - `POST /api/casos` - open a case
//! - `GET /api/casos` - list cases, optionally filtered
//! - `GET /api/casos/{id_caso}` - read one case

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kuntur_persistence::types::CaseFilters;
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for case creation.
///
/// The body is a flat JSON object holding the required fields plus any
/// additional fields to keep with the case.
///
/// # HTTP Request
///
/// `POST /api/casos`
///
/// # Response
///
/// - `201 Created` - Returns the stored case
/// - `400 Bad Request` - Missing required fields or malformed body
/// - `500 Internal Server Error` - Storage failure
///
/// # Example
///
/// ```http
/// POST /api/casos HTTP/1.1
/// Content-Type: application/json
///
/// {"id_alarma": "AL23072504", "nombre_agente": "Juan Pérez", ...}
/// ```
pub async fn create_case_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> RestResult<Response> {
    let Json(body) = payload?;
    let Value::Object(fields) = body else {
        return Err(RestError::BadRequest {
            message: "El cuerpo debe ser un objeto JSON".to_string(),
        });
    };

    debug!(fields = fields.len(), "Processing create case request");

    let case = state
        .repository()
        .create_case(fields)
        .await
        .map_err(|e| RestError::from(e).with_context("Error al crear caso"))?;

    Ok((StatusCode::CREATED, Json(case)).into_response())
}

/// Handler for listing cases.
///
/// # HTTP Request
///
/// `GET /api/casos?id_caso=...&id_alarma=...`
///
/// Both parameters are optional; empty values are ignored. When both are
/// present a case must match both.
pub async fn list_cases_handler(
    State(state): State<AppState>,
    Query(filters): Query<CaseFilters>,
) -> RestResult<Response> {
    debug!(?filters, "Processing list cases request");

    let cases = state
        .repository()
        .get_cases(&filters)
        .await
        .map_err(|e| RestError::from(e).with_context("Error al obtener casos"))?;

    Ok((StatusCode::OK, Json(cases)).into_response())
}

/// Handler for reading one case.
///
/// # HTTP Request
///
/// `GET /api/casos/{id_caso}`
///
/// # Response
///
/// - `200 OK` - Returns the case
/// - `404 Not Found` - No case with that identifier
pub async fn get_case_handler(
    State(state): State<AppState>,
    Path(id_caso): Path<String>,
) -> RestResult<Response> {
    debug!(%id_caso, "Processing read case request");

    let case = state
        .repository()
        .get_case_by_id(&id_caso)
        .await
        .map_err(|e| RestError::from(e).with_context("Error al obtener caso"))?;

    Ok((StatusCode::OK, Json(case)).into_response())
}
