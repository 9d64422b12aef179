//! REST API test harness.
//!
//! Provides a test server over a file backend in a private temporary
//! directory.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;

use kuntur_persistence::CaseRepository;
use kuntur_persistence::backends::file::FileBackend;
use kuntur_persistence::core::Backend;
use kuntur_rest::{AppState, ServerConfig, create_app};

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// let harness = RestTestHarness::new().await;
/// let response = harness.server.get("/api/casos").await;
/// response.assert_status_ok();
/// ```
pub struct RestTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The file backend behind the server.
    pub backend: Arc<FileBackend>,

    /// Location of the case file.
    pub path: PathBuf,

    /// Server configuration.
    pub config: ServerConfig,

    _dir: TempDir,
}

impl RestTestHarness {
    /// Creates a harness over an initialized, empty case file.
    pub async fn new() -> Self {
        let harness = Self::uninitialized();
        harness
            .backend
            .initialize()
            .await
            .expect("Failed to initialize file backend");
        harness
    }

    /// Creates a harness whose case file does not exist yet.
    pub fn uninitialized() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("data").join("casos.json");
        Self::at(dir, path)
    }

    /// Creates a harness whose case path is a directory, so the backend
    /// can never be read or written.
    pub async fn broken() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("casos.json");
        tokio::fs::create_dir_all(&path)
            .await
            .expect("Failed to create blocking directory");
        Self::at(dir, path)
    }

    fn at(dir: TempDir, path: PathBuf) -> Self {
        let config = ServerConfig {
            data_file: path.clone(),
            ..ServerConfig::for_testing()
        };
        let backend = Arc::new(FileBackend::new(&path));

        let state = AppState::new(CaseRepository::new(backend.clone()), config.clone())
            .with_file_store(backend.clone());
        let server = TestServer::new(create_app(state)).expect("Failed to create test server");

        Self {
            server,
            backend,
            path,
            config,
            _dir: dir,
        }
    }

    /// Writes raw JSON to the case file.
    pub async fn write_raw(&self, content: &str) {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .expect("Failed to create data dir");
        }
        tokio::fs::write(&self.path, content)
            .await
            .expect("Failed to write case file");
    }

    /// Reads the raw JSON array stored in the case file.
    pub async fn read_raw(&self) -> Vec<Value> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .expect("Failed to read case file");
        serde_json::from_str(&content).expect("Case file is not a JSON array")
    }

    /// Creates a case through the API and returns the response body.
    pub async fn create_case(&self, id_alarma: &str) -> Value {
        let response = self
            .server
            .post("/api/casos")
            .json(&case_body(id_alarma))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }
}

/// A complete creation body for the given alarm.
pub fn case_body(id_alarma: &str) -> Value {
    json!({
        "id_alarma": id_alarma,
        "nombre_agente": "Juan Pérez",
        "cedula_agente": "1723456789",
        "nombre_victima": "María López",
        "cedula_victima": "1712345678",
        "informe_policial": "Descripción del caso"
    })
}
