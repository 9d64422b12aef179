//! Server configuration for the case REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KDS_PORT` | 8050 | Server port |
//! | `KDS_HOST` | 0.0.0.0 | Host to bind |
//! | `KDS_LOG_LEVEL` | info | Log level |
//! | `KDS_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `KDS_ENABLE_CORS` | true | Enable CORS |
//! | `KDS_CORS_ORIGINS` | * | Allowed origins |
//! | `KDS_STORAGE_BACKEND` | file | Active backend (`file` or `mongodb`) |
//! | `KDS_DATA_FILE` | ./static/data/casos.json | File store path |
//! | `MONGO_URI` | (unset) | MongoDB connection string |
//! | `MONGO_DB_NAME` | kuntur | MongoDB database |
//! | `MONGO_COLLECTION` | casos | Case collection |
//! | `MONGO_REPORTS_COLLECTION` | informes | Reports collection |
//! | `MONGO_SERVER_SELECTION_TIMEOUT_MS` | 5000 | Driver server selection timeout |
//!
//! # Example
//!
//! ```rust
//! use kuntur_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "127.0.0.1".to_string(),
//!     ..Default::default()
//! };
//! ```

use std::path::PathBuf;

use clap::Parser;
use kuntur_persistence::backends::file::DEFAULT_DATA_FILE;
use kuntur_persistence::core::BackendKind;

/// Server configuration for the case REST API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "kds")]
#[command(about = "Kuntur Detector case service")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "KDS_PORT", default_value = "8050")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "KDS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "KDS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "KDS_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "KDS_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "KDS_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Active storage backend: `file` or `mongodb`.
    #[arg(long, env = "KDS_STORAGE_BACKEND", default_value = "file")]
    pub storage_backend: String,

    /// Path of the JSON file used by the file backend.
    #[arg(long, env = "KDS_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// MongoDB connection string. Enables migration and reports when set.
    #[arg(long, env = "MONGO_URI")]
    pub mongo_uri: Option<String>,

    /// MongoDB database name.
    #[arg(long, env = "MONGO_DB_NAME", default_value = "kuntur")]
    pub mongo_db_name: String,

    /// MongoDB collection holding cases.
    #[arg(long, env = "MONGO_COLLECTION", default_value = "casos")]
    pub mongo_collection: String,

    /// MongoDB collection holding reports.
    #[arg(long, env = "MONGO_REPORTS_COLLECTION", default_value = "informes")]
    pub mongo_reports_collection: String,

    /// MongoDB server selection timeout in milliseconds.
    #[arg(long, env = "MONGO_SERVER_SELECTION_TIMEOUT_MS", default_value = "5000")]
    pub mongo_server_selection_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8050,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            storage_backend: "file".to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            mongo_uri: None,
            mongo_db_name: "kuntur".to_string(),
            mongo_collection: "casos".to_string(),
            mongo_reports_collection: "informes".to_string(),
            mongo_server_selection_timeout_ms: 5000,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse_from(["kds"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured storage backend kind.
    pub fn backend_kind(&self) -> Result<BackendKind, String> {
        self.storage_backend
            .parse::<BackendKind>()
            .map_err(|_| format!("Unknown storage backend '{}'", self.storage_backend))
    }

    /// Returns the MongoDB configuration, if a URI is set.
    #[cfg(feature = "mongodb")]
    pub fn mongo_config(&self) -> Option<kuntur_persistence::backends::mongodb::MongoBackendConfig> {
        use kuntur_persistence::backends::mongodb::MongoBackendConfig;

        let uri = self.mongo_uri.as_ref().filter(|uri| !uri.is_empty())?;
        Some(
            MongoBackendConfig::new(uri.clone())
                .with_database(self.mongo_db_name.clone())
                .with_collection(self.mongo_collection.clone())
                .with_reports_collection(self.mongo_reports_collection.clone())
                .with_server_selection_timeout_ms(self.mongo_server_selection_timeout_ms),
        )
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        match self.backend_kind() {
            Ok(BackendKind::MongoDB) => {
                if self.mongo_uri.as_deref().is_none_or(str::is_empty) {
                    errors.push("MONGO_URI is required when the storage backend is mongodb".to_string());
                }
                if !cfg!(feature = "mongodb") {
                    errors.push("This build does not include the mongodb backend".to_string());
                }
            }
            Ok(BackendKind::File) => {}
            Err(e) => errors.push(e),
        }

        if self.mongo_server_selection_timeout_ms == 0 {
            errors.push("MongoDB server selection timeout cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            mongo_server_selection_timeout_ms: 500,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8050);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.enable_cors);
        assert_eq!(config.data_file, PathBuf::from("./static/data/casos.json"));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "127.0.0.1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_unknown_backend() {
        let config = ServerConfig {
            storage_backend: "sqlite".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("sqlite")));
    }

    #[test]
    fn test_validate_mongodb_requires_uri() {
        let config = ServerConfig {
            storage_backend: "mongodb".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("MONGO_URI")));
    }

    #[cfg(feature = "mongodb")]
    #[test]
    fn test_mongo_config() {
        assert!(ServerConfig::default().mongo_config().is_none());

        let config = ServerConfig {
            mongo_uri: Some("mongodb://db:27017".to_string()),
            mongo_db_name: "kds".to_string(),
            ..Default::default()
        };
        let mongo = config.mongo_config().unwrap();
        assert_eq!(mongo.database, "kds");
        assert_eq!(mongo.collection, "casos");
        assert_eq!(mongo.server_selection_timeout_ms, 5000);
    }

    #[test]
    fn test_parse_from_args() {
        let config = ServerConfig::try_parse_from([
            "kds",
            "--port",
            "9000",
            "--storage-backend",
            "mongodb",
            "--mongo-uri",
            "mongodb://localhost:27017",
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.backend_kind().unwrap(), BackendKind::MongoDB);
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert_eq!(config.storage_backend, "file");
    }
}
