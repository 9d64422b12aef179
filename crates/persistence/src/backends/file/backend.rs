//! File backend implementation.

use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::core::{Backend, BackendKind};
use crate::error::{BackendError, StorageResult};

/// Default location of the case file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "./static/data/casos.json";

/// Configuration for the file backend.
#[derive(Debug, Clone)]
pub struct FileBackendConfig {
    /// Path of the JSON array file.
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

/// File backend for case storage.
///
/// All records live in one JSON array. Reads load the whole array without
/// locking; writes hold an in-process lock around the read-modify-write
/// cycle and replace the file by renaming a fully written temporary file.
pub struct FileBackend {
    config: FileBackendConfig,
    write_lock: Arc<Mutex<()>>,
}

impl Debug for FileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBackend")
            .field("path", &self.config.path)
            .finish_non_exhaustive()
    }
}

/// Raw contents of the case file.
#[derive(Debug)]
pub(crate) enum FileContents {
    /// The file does not exist.
    Missing,
    /// Every entry of the stored array, parsed or not.
    Entries(Vec<Value>),
}

impl FileContents {
    pub(crate) fn into_entries(self) -> Vec<Value> {
        match self {
            FileContents::Missing => Vec::new(),
            FileContents::Entries(entries) => entries,
        }
    }
}

impl FileBackend {
    /// Creates a backend over the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(FileBackendConfig { path: path.into() })
    }

    /// Creates a backend with custom configuration.
    pub fn with_config(config: FileBackendConfig) -> Self {
        Self {
            config,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the path of the case file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &FileBackendConfig {
        &self.config
    }

    /// Returns true if the case file exists.
    pub async fn file_exists(&self) -> StorageResult<bool> {
        tokio::fs::try_exists(self.path())
            .await
            .map_err(|e| self.io_error(e).into())
    }

    /// Loads the stored array.
    ///
    /// Content that is not a JSON array reads as an empty array and is left
    /// untouched on disk.
    pub(crate) async fn load(&self) -> StorageResult<FileContents> {
        let bytes = match tokio::fs::read(self.path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FileContents::Missing),
            Err(e) => return Err(self.io_error(e).into()),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => Ok(FileContents::Entries(entries)),
            Ok(_) => {
                warn!(path = %self.path().display(), "Case file is not a JSON array, reading as empty");
                Ok(FileContents::Entries(Vec::new()))
            }
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "Case file is not valid JSON, reading as empty");
                Ok(FileContents::Entries(Vec::new()))
            }
        }
    }

    /// Replaces the file with `entries`, pretty-printed.
    pub(crate) async fn store(&self, entries: &[Value]) -> StorageResult<()> {
        self.ensure_parent_dir().await?;

        let mut bytes = serde_json::to_vec_pretty(entries)?;
        bytes.push(b'\n');

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| io_error_at(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, self.path())
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path().display(), entries = entries.len(), "Rewrote case file");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        self.path().with_extension("json.tmp")
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path()
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    async fn ensure_parent_dir(&self) -> Result<(), BackendError> {
        if let Some(parent) = self.parent_dir() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error_at(parent, e))?;
        }
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> BackendError {
        io_error_at(self.path(), source)
    }
}

fn io_error_at(path: &Path, source: std::io::Error) -> BackendError {
    BackendError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl Backend for FileBackend {
    type Connection = OwnedMutexGuard<()>;

    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    fn name(&self) -> &'static str {
        "file"
    }

    async fn acquire(&self) -> Result<Self::Connection, BackendError> {
        Ok(Arc::clone(&self.write_lock).lock_owned().await)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        match tokio::fs::metadata(self.path()).await {
            Ok(meta) if meta.is_file() => return Ok(()),
            Ok(_) => {
                return Err(BackendError::Unavailable {
                    backend_name: "file".to_string(),
                    message: format!("{} is not a regular file", self.path().display()),
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error(e)),
        }

        // A missing file is created on first write; its directory must be usable.
        let parent = self.parent_dir().unwrap_or(Path::new("."));
        match tokio::fs::metadata(parent).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(BackendError::Unavailable {
                backend_name: "file".to_string(),
                message: format!("{} is not a directory", parent.display()),
            }),
            Err(e) => Err(io_error_at(parent, e)),
        }
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        self.ensure_parent_dir().await?;

        let exists = tokio::fs::try_exists(self.path())
            .await
            .map_err(|e| self.io_error(e))?;
        if !exists {
            tokio::fs::write(self.path(), b"[]\n")
                .await
                .map_err(|e| self.io_error(e))?;
            info!(path = %self.path().display(), "Created empty case file");
        }
        Ok(())
    }
}
