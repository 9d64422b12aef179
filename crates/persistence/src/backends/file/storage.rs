//! CaseStorage implementation for the file backend.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{Backend, CaseBuilder, CaseStorage, PingStatus};
use crate::error::{ResourceError, StorageResult};
use crate::types::{Case, CaseQuery};

use super::FileBackend;

/// Decodes the entries selected by `keep`, skipping any without a string
/// `id_caso`.
fn decode_entries<F>(entries: Vec<Value>, keep: F) -> Vec<Case>
where
    F: Fn(&Value) -> bool,
{
    entries
        .into_iter()
        .enumerate()
        .filter(|(_, entry)| keep(entry))
        .filter_map(|(index, entry)| match Case::from_value(entry) {
            Ok(case) => Some(case),
            Err(e) => {
                warn!(index, error = %e, "Skipping stored entry without a case identifier");
                None
            }
        })
        .collect()
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id_caso").and_then(Value::as_str)
}

fn stored_ids(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(entry_id)
        .map(str::to_string)
        .collect()
}

impl FileBackend {
    /// Appends `case` to `entries` and rewrites the file. Callers hold the
    /// write lock.
    async fn append(&self, entries: &mut Vec<Value>, case: Case) -> StorageResult<Case> {
        if entries.iter().any(|entry| entry_id(entry) == Some(case.id_caso())) {
            return Err(ResourceError::AlreadyExists {
                id_caso: case.id_caso().to_string(),
            }
            .into());
        }

        entries.push(case.to_value()?);
        self.store(entries.as_slice()).await?;

        debug!(id_caso = case.id_caso(), "Inserted case into file");
        Ok(case)
    }
}

#[async_trait]
impl CaseStorage for FileBackend {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn list_all(&self) -> StorageResult<Vec<Case>> {
        let entries = self.load().await?.into_entries();
        debug!(entries = entries.len(), "Listing cases from file");
        Ok(decode_entries(entries, |_| true))
    }

    async fn find(&self, query: &CaseQuery) -> StorageResult<Vec<Case>> {
        let entries = self.load().await?.into_entries();
        debug!(?query, entries = entries.len(), "Filtering cases from file");
        Ok(decode_entries(entries, |entry| {
            entry.as_object().is_some_and(|record| query.matches(record))
        }))
    }

    async fn case_ids(&self) -> StorageResult<Vec<String>> {
        let entries = self.load().await?.into_entries();
        Ok(stored_ids(&entries))
    }

    async fn exists(&self, id_caso: &str) -> StorageResult<bool> {
        let entries = self.load().await?.into_entries();
        Ok(entries.iter().any(|entry| entry_id(entry) == Some(id_caso)))
    }

    async fn insert(&self, case: Case) -> StorageResult<Case> {
        let guard = self.acquire().await?;
        let mut entries = self.load().await?.into_entries();
        let case = self.append(&mut entries, case).await?;
        self.release(guard).await;
        Ok(case)
    }

    async fn insert_next(&self, build: CaseBuilder) -> StorageResult<Case> {
        let guard = self.acquire().await?;
        let mut entries = self.load().await?.into_entries();
        let case = build(&stored_ids(&entries));
        let case = self.append(&mut entries, case).await?;
        self.release(guard).await;
        Ok(case)
    }

    async fn ping(&self) -> PingStatus {
        match self.health_check().await {
            Ok(()) => PingStatus::connected(format!("file {}", self.path().display())),
            Err(e) => PingStatus::disconnected(e.to_string()),
        }
    }
}
