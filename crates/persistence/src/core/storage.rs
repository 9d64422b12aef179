//! Core case storage trait.
//!
//! This module defines the [`CaseStorage`] trait, the record-level interface
//! every storage backend implements, and [`PingStatus`], the outcome of a
//! liveness probe.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::StorageResult;
use crate::types::{Case, CaseQuery};

/// Outcome of a liveness probe.
///
/// A probe never fails; an unreachable backend reports `connected: false`
/// and a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingStatus {
    pub connected: bool,
    pub message: String,
}

impl PingStatus {
    pub fn connected(message: impl Into<String>) -> Self {
        Self {
            connected: true,
            message: message.into(),
        }
    }

    pub fn disconnected(message: impl Into<String>) -> Self {
        Self {
            connected: false,
            message: message.into(),
        }
    }
}

/// Builds the record to insert from the identifiers currently stored.
pub type CaseBuilder = Box<dyn FnOnce(&[String]) -> Case + Send>;

/// Storage trait for case records.
///
/// Records are created once and never updated or deleted, so the surface is
/// insert plus equality reads.
///
/// # Example
///
/// ```ignore
/// use kuntur_persistence::core::CaseStorage;
/// use kuntur_persistence::types::CaseQuery;
///
/// async fn example(storage: &dyn CaseStorage) -> StorageResult<()> {
///     let by_alarm = storage.find_by_field("id_alarma", "AL1".into()).await?;
///     let exact = storage
///         .find(&CaseQuery::new().with_field("id_caso", "CASO-0001"))
///         .await?;
///     println!("{} / {}", by_alarm.len(), exact.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CaseStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Returns every stored record.
    ///
    /// Order is stable for one backend instance: file order for the file
    /// store, natural order for the document store.
    async fn list_all(&self) -> StorageResult<Vec<Case>>;

    /// Returns the records satisfying every condition of `query`.
    ///
    /// An empty query behaves like [`list_all`](Self::list_all).
    async fn find(&self, query: &CaseQuery) -> StorageResult<Vec<Case>>;

    /// Returns the records whose top-level `field` equals `value`.
    async fn find_by_field(&self, field: &str, value: Value) -> StorageResult<Vec<Case>> {
        self.find(&CaseQuery::new().with_field(field, value)).await
    }

    /// Persists a fully formed record and returns its stored form.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(AlreadyExists)` - a record with the same `id_caso` is stored
    /// * `StorageError::Backend` - the write failed
    async fn insert(&self, case: Case) -> StorageResult<Case>;

    /// Reads the stored identifiers, builds a record from them and inserts it.
    ///
    /// The default reads and inserts separately and relies on [`insert`](Self::insert)
    /// rejecting a concurrently taken identifier. Backends that can hold a
    /// write lock across the whole cycle override it.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    async fn insert_next(&self, build: CaseBuilder) -> StorageResult<Case> {
        let ids = self.case_ids().await?;
        self.insert(build(&ids)).await
    }

    /// Returns every stored `id_caso`, including those of entries that do
    /// not decode as full cases.
    async fn case_ids(&self) -> StorageResult<Vec<String>> {
        let cases = self.list_all().await?;
        Ok(cases.iter().map(|c| c.id_caso().to_string()).collect())
    }

    /// Returns true if a record with this identifier is stored.
    async fn exists(&self, id_caso: &str) -> StorageResult<bool> {
        let found = self
            .find(&CaseQuery::new().with_field("id_caso", id_caso))
            .await?;
        Ok(!found.is_empty())
    }

    /// Probes the backend.
    async fn ping(&self) -> PingStatus;
}
