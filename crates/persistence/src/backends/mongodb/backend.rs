//! MongoDB backend implementation.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, ClientSession, Collection, IndexModel, SessionCursor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Backend, BackendKind};
use crate::error::{BackendError, StorageResult};

/// Configuration for the MongoDB backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoBackendConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,

    /// Database holding the case and report collections.
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection holding one document per case.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Read-only collection of externally produced reports.
    #[serde(default = "default_reports_collection")]
    pub reports_collection: String,

    /// Driver server selection timeout in milliseconds.
    #[serde(default = "default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,

    /// Application name reported to the server.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_database() -> String {
    "kuntur".to_string()
}

fn default_collection() -> String {
    "casos".to_string()
}

fn default_reports_collection() -> String {
    "informes".to_string()
}

fn default_server_selection_timeout_ms() -> u64 {
    5000
}

fn default_app_name() -> String {
    "kuntur-kds".to_string()
}

impl MongoBackendConfig {
    /// Creates a configuration with default names for the given URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: default_database(),
            collection: default_collection(),
            reports_collection: default_reports_collection(),
            server_selection_timeout_ms: default_server_selection_timeout_ms(),
            app_name: default_app_name(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_reports_collection(mut self, collection: impl Into<String>) -> Self {
        self.reports_collection = collection.into();
        self
    }

    pub fn with_server_selection_timeout_ms(mut self, timeout: u64) -> Self {
        self.server_selection_timeout_ms = timeout;
        self
    }
}

/// MongoDB backend for case storage.
///
/// The driver's client owns the connection pool. Every operation runs in
/// its own client session, which is returned to the pool when dropped.
pub struct MongoBackend {
    client: Client,
    config: MongoBackendConfig,
}

impl Debug for MongoBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URI may carry credentials.
        f.debug_struct("MongoBackend")
            .field("database", &self.config.database)
            .field("collection", &self.config.collection)
            .field("reports_collection", &self.config.reports_collection)
            .finish_non_exhaustive()
    }
}

impl MongoBackend {
    /// Creates a backend from configuration.
    ///
    /// Parsing the URI may resolve DNS seed lists; no server is contacted
    /// until the first operation.
    pub async fn connect(config: MongoBackendConfig) -> StorageResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            BackendError::ConnectionFailed {
                backend_name: "mongodb".to_string(),
                message: format!("invalid connection string: {e}"),
            }
        })?;
        options.server_selection_timeout =
            Some(Duration::from_millis(config.server_selection_timeout_ms));
        options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(options)?;
        debug!(
            database = %config.database,
            collection = %config.collection,
            "Created MongoDB client"
        );

        Ok(Self { client, config })
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &MongoBackendConfig {
        &self.config
    }

    pub(crate) fn cases(&self) -> Collection<Document> {
        self.client
            .database(&self.config.database)
            .collection(&self.config.collection)
    }

    pub(crate) fn reports(&self) -> Collection<Document> {
        self.client
            .database(&self.config.database)
            .collection(&self.config.reports_collection)
    }
}

/// Drains a session cursor into memory.
pub(crate) async fn collect_documents(
    mut cursor: SessionCursor<Document>,
    session: &mut ClientSession,
) -> StorageResult<Vec<Document>> {
    let mut documents = Vec::new();
    while cursor.advance(session).await? {
        documents.push(cursor.deserialize_current()?);
    }
    Ok(documents)
}

#[async_trait]
impl Backend for MongoBackend {
    type Connection = ClientSession;

    fn kind(&self) -> BackendKind {
        BackendKind::MongoDB
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn acquire(&self) -> Result<Self::Connection, BackendError> {
        self.client.start_session().await.map_err(BackendError::from)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| BackendError::Unavailable {
                backend_name: "mongodb".to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        let index = IndexModel::builder()
            .keys(doc! { "id_caso": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_caso_unique".to_string())
                    .build(),
            )
            .build();
        self.cases().create_index(index).await?;

        info!(
            database = %self.config.database,
            collection = %self.config.collection,
            "Ensured unique index on id_caso"
        );
        Ok(())
    }
}
