//! Error types for the case REST API.
//!
//! Every error is returned as a JSON body of the form `{"detail": "<message>"}`.
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are mapped to HTTP status codes:
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | MissingRequiredFields | 400 |
//! | NotFound | 404 |
//! | AlreadyExists | 409 |
//! | Backend Unavailable / ConnectionFailed | 503 |
//! | Migration TargetUnavailable | 503 |
//! | other Backend / Migration | 500 |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kuntur_persistence::error::{
    BackendError, MigrationError, ResourceError, StorageError, ValidationError,
};
use serde_json::json;
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Case not found (HTTP 404).
    NotFound {
        /// The requested case identifier.
        id_caso: String,
    },

    /// Bad request - validation error (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Identifier collision that survived the repository retry (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// A required backend is not configured or not reachable (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Prefixes the message of a server-side error with the failed action.
    ///
    /// Client errors keep their message unchanged.
    pub fn with_context(self, action: &str) -> Self {
        match self {
            RestError::InternalError { message } => RestError::InternalError {
                message: format!("{action}: {message}"),
            },
            RestError::ServiceUnavailable { message } => RestError::ServiceUnavailable {
                message: format!("{action}: {message}"),
            },
            other => other,
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { id_caso } => write!(f, "Caso {} no encontrado", id_caso),
            RestError::BadRequest { message }
            | RestError::Conflict { message }
            | RestError::ServiceUnavailable { message }
            | RestError::InternalError { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => e.into(),
            StorageError::Resource(e) => e.into(),
            StorageError::Backend(e) => e.into(),
            StorageError::Migration(e) => e.into(),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        let message = match err {
            ValidationError::MissingRequiredFields { fields } => {
                format!("Campos requeridos faltantes: {}", fields.join(", "))
            }
        };
        RestError::BadRequest { message }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { id_caso } => RestError::NotFound { id_caso },
            ResourceError::AlreadyExists { id_caso } => RestError::Conflict {
                message: format!("El caso {} ya existe", id_caso),
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. } => {
                RestError::ServiceUnavailable {
                    message: err.to_string(),
                }
            }
            _ => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

impl From<MigrationError> for RestError {
    fn from(err: MigrationError) -> Self {
        match err {
            MigrationError::TargetUnavailable { .. } => RestError::ServiceUnavailable {
                message: err.to_string(),
            },
            MigrationError::SourceUnreadable { .. } => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::BadRequest {
            message: format!("Cuerpo JSON inválido: {}", rejection.body_text()),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
