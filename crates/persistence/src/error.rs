//! Error types for the persistence layer.
//!
//! Errors are organized in a small hierarchy: [`StorageError`] is what every
//! public operation returns, and it wraps one category enum per failure class
//! (validation, resource state, backend I/O, migration).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Migration errors
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

impl StorageError {
    /// Returns true if this error reports a duplicate `id_caso`.
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::AlreadyExists { .. }))
    }

    /// Returns true if this error reports a missing case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::NotFound { .. }))
    }
}

/// Errors related to the fields supplied when creating a case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are absent.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingRequiredFields { fields: Vec<String> },
}

/// Errors related to case state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No case carries the requested identifier.
    #[error("case not found: {id_caso}")]
    NotFound { id_caso: String },

    /// A case with the given identifier is already stored.
    #[error("case already exists: {id_caso}")]
    AlreadyExists { id_caso: String },
}

/// Errors originating from a storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is not configured or currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// File system error in a file-backed store.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Errors raised by the file-to-document-store migration.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The source file exists but could not be read.
    #[error("migration source unreadable: {message}")]
    SourceUnreadable { message: String },

    /// The target backend could not be reached or refused a write.
    #[error("migration target unavailable after {migrated} inserted record(s): {message}")]
    TargetUnavailable { migrated: usize, message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// Implement conversions from common error types

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        StorageError::Backend(BackendError::from(err))
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for BackendError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { message, .. } => BackendError::ConnectionFailed {
                backend_name: "mongodb".to_string(),
                message: message.clone(),
            },
            ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
                BackendError::SerializationError {
                    message: err.to_string(),
                }
            }
            _ => BackendError::Internal {
                backend_name: "mongodb".to_string(),
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::bson::ser::Error> for StorageError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}
