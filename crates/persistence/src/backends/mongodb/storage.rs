//! CaseStorage implementation for MongoDB.

use async_trait::async_trait;
use mongodb::bson::doc;
use tracing::{debug, warn};

use crate::core::{Backend, CaseStorage, PingStatus};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::{Case, CaseQuery};

use super::MongoBackend;
use super::backend::collect_documents;
use super::convert::{case_to_document, document_to_case, is_duplicate_key, query_to_filter};

#[async_trait]
impl CaseStorage for MongoBackend {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn list_all(&self) -> StorageResult<Vec<Case>> {
        self.find(&CaseQuery::new()).await
    }

    async fn find(&self, query: &CaseQuery) -> StorageResult<Vec<Case>> {
        let filter = query_to_filter(query)?;
        debug!(?filter, "Querying cases");

        let mut session = self.acquire().await?;
        let cursor = self.cases().find(filter).session(&mut session).await?;
        let documents = collect_documents(cursor, &mut session).await?;
        self.release(session).await;

        Ok(documents
            .into_iter()
            .filter_map(|document| match document_to_case(document) {
                Ok(case) => Some(case),
                Err(e) => {
                    warn!(error = %e, "Skipping stored document without a case identifier");
                    None
                }
            })
            .collect())
    }

    async fn case_ids(&self) -> StorageResult<Vec<String>> {
        let mut session = self.acquire().await?;
        let cursor = self
            .cases()
            .find(doc! {})
            .projection(doc! { "_id": 0, "id_caso": 1 })
            .session(&mut session)
            .await?;
        let documents = collect_documents(cursor, &mut session).await?;
        self.release(session).await;

        Ok(documents
            .iter()
            .filter_map(|document| document.get_str("id_caso").ok())
            .map(str::to_string)
            .collect())
    }

    async fn exists(&self, id_caso: &str) -> StorageResult<bool> {
        let mut session = self.acquire().await?;
        let found = self
            .cases()
            .find_one(doc! { "id_caso": id_caso })
            .session(&mut session)
            .await?;
        self.release(session).await;

        Ok(found.is_some())
    }

    async fn insert(&self, case: Case) -> StorageResult<Case> {
        let document = case_to_document(&case)?;
        let mut session = self.acquire().await?;

        let inserted = match self
            .cases()
            .insert_one(document)
            .session(&mut session)
            .await
        {
            Ok(result) => result,
            Err(e) if is_duplicate_key(&e) => {
                return Err(ResourceError::AlreadyExists {
                    id_caso: case.id_caso().to_string(),
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        let stored = self
            .cases()
            .find_one(doc! { "_id": inserted.inserted_id.clone() })
            .session(&mut session)
            .await?
            .ok_or_else(|| {
                StorageError::Backend(BackendError::Internal {
                    backend_name: "mongodb".to_string(),
                    message: format!("inserted case {} could not be read back", case.id_caso()),
                    source: None,
                })
            })?;
        self.release(session).await;

        debug!(id_caso = case.id_caso(), "Inserted case into MongoDB");
        Ok(document_to_case(stored)?)
    }

    async fn ping(&self) -> PingStatus {
        match self.health_check().await {
            Ok(()) => PingStatus::connected(format!("mongodb {}", self.config().database)),
            Err(e) => PingStatus::disconnected(e.to_string()),
        }
    }
}
