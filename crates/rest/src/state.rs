//! Application state for the case REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the case repository over the active backend, the
//! configuration, and the stores the migration and report endpoints use.

use std::sync::Arc;

use kuntur_persistence::CaseRepository;
use kuntur_persistence::backends::file::FileBackend;

#[cfg(feature = "mongodb")]
use kuntur_persistence::backends::mongodb::MongoBackend;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Example
///
/// ```rust,ignore
/// use kuntur_rest::{AppState, ServerConfig};
/// use kuntur_persistence::{CaseRepository, backends::file::FileBackend};
/// use std::sync::Arc;
///
/// let config = ServerConfig::default();
/// let backend = Arc::new(FileBackend::new(&config.data_file));
/// let state = AppState::new(CaseRepository::new(backend), config);
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Repository over the active backend.
    repository: CaseRepository,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// File store read by the migration endpoint.
    file_store: Arc<FileBackend>,

    /// Document store, when one is configured.
    #[cfg(feature = "mongodb")]
    document_store: Option<Arc<MongoBackend>>,
}

impl AppState {
    /// Creates a new AppState with the given repository and configuration.
    ///
    /// The migration source defaults to the configured data file.
    pub fn new(repository: CaseRepository, config: ServerConfig) -> Self {
        let file_store = Arc::new(FileBackend::new(&config.data_file));
        Self {
            repository,
            config: Arc::new(config),
            file_store,
            #[cfg(feature = "mongodb")]
            document_store: None,
        }
    }

    /// Uses an existing file backend as the migration source.
    pub fn with_file_store(mut self, file_store: Arc<FileBackend>) -> Self {
        self.file_store = file_store;
        self
    }

    /// Attaches the document store used by migration and report listing.
    #[cfg(feature = "mongodb")]
    pub fn with_document_store(mut self, document_store: Arc<MongoBackend>) -> Self {
        self.document_store = Some(document_store);
        self
    }

    /// Returns the case repository.
    pub fn repository(&self) -> &CaseRepository {
        &self.repository
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the file store used as migration source.
    pub fn file_store(&self) -> &FileBackend {
        &self.file_store
    }

    /// Returns the document store, if configured.
    #[cfg(feature = "mongodb")]
    pub fn document_store(&self) -> Option<&MongoBackend> {
        self.document_store.as_deref()
    }
}
