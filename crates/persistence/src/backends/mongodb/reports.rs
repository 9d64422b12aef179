//! Read-only listing of the reports collection.

use serde_json::Value;
use tracing::debug;

use crate::core::Backend;
use crate::error::StorageResult;

use super::MongoBackend;
use super::backend::collect_documents;
use super::convert::document_to_json;

impl MongoBackend {
    /// Returns every report document verbatim, with `_id` as a string.
    ///
    /// Reports are produced outside this service and are never written here.
    pub async fn list_reports(&self) -> StorageResult<Vec<Value>> {
        let mut session = self.acquire().await?;
        let cursor = self
            .reports()
            .find(mongodb::bson::Document::new())
            .session(&mut session)
            .await?;
        let documents = collect_documents(cursor, &mut session).await?;
        self.release(session).await;

        debug!(count = documents.len(), "Listed reports");
        Ok(documents.into_iter().map(document_to_json).collect())
    }
}
