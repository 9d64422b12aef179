//! Backend abstraction for storage drivers.
//!
//! This module defines the [`Backend`] trait, which covers the lifecycle side
//! of a storage driver: what it is, how a per-operation resource is obtained
//! and given back, and how it is prepared and probed. Record operations live
//! in [`CaseStorage`](super::storage::CaseStorage).

use std::fmt::Debug;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Single JSON array in a local file.
    File,
    /// MongoDB (document store).
    MongoDB,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::MongoDB => write!(f, "mongodb"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(BackendKind::File),
            "mongodb" | "mongo" => Ok(BackendKind::MongoDB),
            other => Err(BackendError::Unavailable {
                backend_name: other.to_string(),
                message: "unknown storage backend (expected 'file' or 'mongodb')".to_string(),
            }),
        }
    }
}

/// A storage backend that owns some scoped resource per operation.
///
/// # Design
///
/// `Connection` is whatever an operation must hold for its duration: a
/// client session for the document store, the write lock for the file
/// store. It is released when dropped, so [`release`](Backend::release) only
/// exists to make the hand-back explicit at call sites that want it.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// The scoped resource held for one operation.
    type Connection: Send;

    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Acquires the per-operation resource.
    async fn acquire(&self) -> Result<Self::Connection, BackendError>;

    /// Gives the resource back.
    async fn release(&self, conn: Self::Connection) {
        drop(conn);
    }

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Prepares storage (files, indexes) if needed.
    async fn initialize(&self) -> Result<(), BackendError>;
}
