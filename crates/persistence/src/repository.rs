//! Case repository.
//!
//! [`CaseRepository`] is the single entry point the HTTP layer uses. It owns
//! identifier assignment and creation stamping; the backend it wraps is
//! chosen once at startup.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::{CaseStorage, PingStatus, next_case_id};
use crate::error::{ResourceError, StorageResult};
use crate::types::{Case, CaseFilters, CaseQuery, NewCase};

/// Repository over the active storage backend.
#[derive(Clone)]
pub struct CaseRepository {
    storage: Arc<dyn CaseStorage>,
}

impl std::fmt::Debug for CaseRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseRepository")
            .field("backend", &self.storage.backend_name())
            .finish()
    }
}

impl CaseRepository {
    pub fn new(storage: Arc<dyn CaseStorage>) -> Self {
        Self { storage }
    }

    /// Returns the wrapped storage.
    pub fn storage(&self) -> &Arc<dyn CaseStorage> {
        &self.storage
    }

    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    /// Opens a new case from caller-supplied fields.
    ///
    /// The case receives the next sequential identifier, the current local
    /// time and the open state. Identifier generation and the write run as
    /// one storage operation; on backends without a write lock, a collision
    /// with another writer is retried once.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - required fields are absent
    /// * `StorageError::Resource(AlreadyExists)` - the retry also collided
    /// * `StorageError::Backend` - the storage failed
    pub async fn create_case(&self, fields: Map<String, Value>) -> StorageResult<Case> {
        let new_case = NewCase::from_fields(fields)?;

        match self.insert_next(new_case.clone()).await {
            Err(e) if e.is_duplicate_id() => {
                warn!(error = %e, "Case identifier taken concurrently, retrying once");
                self.insert_next(new_case).await
            }
            result => result,
        }
    }

    async fn insert_next(&self, new_case: NewCase) -> StorageResult<Case> {
        let fecha_creacion = chrono::Local::now().to_rfc3339();
        self.storage
            .insert_next(Box::new(move |existing: &[String]| {
                let id_caso = next_case_id(existing.iter().map(String::as_str));
                debug!(%id_caso, id_alarma = ?new_case.get("id_alarma"), "Creating case");
                Case::open(id_caso, new_case, fecha_creacion)
            }))
            .await
    }

    /// Returns the cases matching every non-empty filter.
    pub async fn get_cases(&self, filters: &CaseFilters) -> StorageResult<Vec<Case>> {
        let query = filters.to_query();
        debug!(?query, "Listing cases");
        if query.is_empty() {
            self.storage.list_all().await
        } else {
            self.storage.find(&query).await
        }
    }

    /// Returns the case with the given identifier.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - no case carries `id_caso`
    pub async fn get_case_by_id(&self, id_caso: &str) -> StorageResult<Case> {
        let query = CaseQuery::new().with_field("id_caso", id_caso);
        self.storage
            .find(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ResourceError::NotFound {
                    id_caso: id_caso.to_string(),
                }
                .into()
            })
    }

    /// Probes the active backend.
    pub async fn ping(&self) -> PingStatus {
        self.storage.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::StorageError;

    /// In-memory storage that rejects the first `collisions` inserts.
    struct CollidingStorage {
        collisions: usize,
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl CaseStorage for CollidingStorage {
        fn backend_name(&self) -> &'static str {
            "colliding"
        }

        async fn list_all(&self) -> StorageResult<Vec<Case>> {
            Ok(Vec::new())
        }

        async fn find(&self, _query: &CaseQuery) -> StorageResult<Vec<Case>> {
            Ok(Vec::new())
        }

        async fn insert(&self, case: Case) -> StorageResult<Case> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.collisions {
                return Err(ResourceError::AlreadyExists {
                    id_caso: case.id_caso().to_string(),
                }
                .into());
            }
            Ok(case)
        }

        async fn ping(&self) -> PingStatus {
            PingStatus::connected("memory")
        }
    }

    fn fields() -> Map<String, Value> {
        json!({
            "id_alarma": "AL1",
            "nombre_agente": "a",
            "cedula_agente": "b",
            "nombre_victima": "c",
            "cedula_victima": "d",
            "informe_policial": "e"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn repository(collisions: usize) -> (CaseRepository, Arc<CollidingStorage>) {
        let storage = Arc::new(CollidingStorage {
            collisions,
            attempts: AtomicUsize::new(0),
        });
        (CaseRepository::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_single_collision_is_retried() {
        let (repo, storage) = repository(1);
        let case = repo.create_case(fields()).await.unwrap();
        assert_eq!(case.id_caso(), "CASO-0001");
        assert_eq!(storage.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_collision_surfaces() {
        let (repo, storage) = repository(2);
        let err = repo.create_case(fields()).await.unwrap_err();
        assert!(err.is_duplicate_id());
        assert_eq!(storage.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_validation_is_not_retried() {
        let (repo, storage) = repository(0);
        let err = repo.create_case(Map::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
        assert_eq!(storage.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_not_found() {
        let (repo, _) = repository(0);
        let err = repo.get_case_by_id("CASO-9999").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.backend_name(), "colliding");
    }
}
