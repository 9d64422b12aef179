//! MongoDB backend integration tests.
//!
//! Tests that need a server run only when `KUNTUR_TEST_MONGODB_URI` points
//! at one. Each of them uses its own database, dropped afterwards.

#![cfg(feature = "mongodb")]

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{case_fields, create_file_backend, sample_case};
use kuntur_persistence::backends::mongodb::{MongoBackend, MongoBackendConfig};
use kuntur_persistence::core::{Backend, CaseStorage};
use kuntur_persistence::migration::migrate_file_to_store;
use kuntur_persistence::repository::CaseRepository;
use kuntur_persistence::types::CaseFilters;

struct MongoFixture {
    backend: MongoBackend,
    client: mongodb::Client,
    database: String,
}

impl MongoFixture {
    async fn cleanup(self) {
        self.client
            .database(&self.database)
            .drop()
            .await
            .expect("Failed to drop test database");
    }
}

async fn create_fixture(test_name: &str) -> Option<MongoFixture> {
    let uri = std::env::var("KUNTUR_TEST_MONGODB_URI").ok()?;
    let database = format!("kuntur_test_{test_name}");

    let client = mongodb::Client::with_uri_str(&uri)
        .await
        .expect("Failed to create MongoDB client");
    client
        .database(&database)
        .drop()
        .await
        .expect("Failed to reset test database");

    let config = MongoBackendConfig::new(uri)
        .with_database(database.clone())
        .with_server_selection_timeout_ms(2000);
    let backend = MongoBackend::connect(config)
        .await
        .expect("Failed to create MongoDB backend");
    backend.initialize().await.expect("Failed to create indexes");

    Some(MongoFixture {
        backend,
        client,
        database,
    })
}

#[tokio::test]
async fn test_insert_and_find() {
    let Some(fixture) = create_fixture("insert_and_find").await else {
        return;
    };
    let backend = &fixture.backend;

    let stored = backend.insert(sample_case("CASO-0001", "AL1")).await.unwrap();
    assert_eq!(stored.id_caso(), "CASO-0001");
    let surrogate = stored.fields()["_id"].as_str().unwrap().to_string();
    assert_eq!(surrogate.len(), 24);

    backend.insert(sample_case("CASO-0002", "AL2")).await.unwrap();

    let by_alarm = backend.find_by_field("id_alarma", json!("AL2")).await.unwrap();
    assert_eq!(by_alarm.len(), 1);
    assert_eq!(by_alarm[0].id_caso(), "CASO-0002");

    let by_surrogate = backend.find_by_field("_id", json!(surrogate)).await.unwrap();
    assert_eq!(by_surrogate[0].id_caso(), "CASO-0001");

    assert_eq!(backend.case_ids().await.unwrap(), vec!["CASO-0001", "CASO-0002"]);
    fixture.cleanup().await;
}

#[tokio::test]
async fn test_duplicate_rejected_by_index() {
    let Some(fixture) = create_fixture("duplicate").await else {
        return;
    };
    let backend = &fixture.backend;

    backend.insert(sample_case("CASO-0001", "AL1")).await.unwrap();
    let err = backend
        .insert(sample_case("CASO-0001", "AL2"))
        .await
        .unwrap_err();
    assert!(err.is_duplicate_id());
    assert!(backend.exists("CASO-0001").await.unwrap());
    fixture.cleanup().await;
}

#[tokio::test]
async fn test_repository_over_mongodb() {
    let Some(fixture) = create_fixture("repository").await else {
        return;
    };
    let config = fixture.backend.config().clone();
    let repo = CaseRepository::new(Arc::new(MongoBackend::connect(config).await.unwrap()));

    let first = repo.create_case(case_fields("AL1")).await.unwrap();
    let second = repo.create_case(case_fields("AL1")).await.unwrap();
    assert_eq!(first.id_caso(), "CASO-0001");
    assert_eq!(second.id_caso(), "CASO-0002");

    let cases = repo.get_cases(&CaseFilters::by_alarm("AL1")).await.unwrap();
    assert_eq!(cases.len(), 2);
    assert!(repo.ping().await.connected);
    fixture.cleanup().await;
}

#[tokio::test]
async fn test_file_migration_into_mongodb() {
    let Some(fixture) = create_fixture("migration").await else {
        return;
    };
    let source = create_file_backend().await;
    source.backend.insert(sample_case("CASO-0004", "AL1")).await.unwrap();
    source.backend.insert(sample_case("CASO-0009", "AL2")).await.unwrap();

    let first = migrate_file_to_store(&source.backend, &fixture.backend)
        .await
        .unwrap();
    assert_eq!((first.migrados, first.total), (2, 2));

    let second = migrate_file_to_store(&source.backend, &fixture.backend)
        .await
        .unwrap();
    assert_eq!((second.migrados, second.total), (0, 2));
    fixture.cleanup().await;
}

#[tokio::test]
async fn test_list_reports() {
    let Some(fixture) = create_fixture("reports").await else {
        return;
    };
    fixture
        .client
        .database(&fixture.database)
        .collection::<mongodb::bson::Document>("informes")
        .insert_one(mongodb::bson::doc! { "id_caso": "CASO-0001", "resumen": "Parte diario" })
        .await
        .unwrap();

    let reports = fixture.backend.list_reports().await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["resumen"], "Parte diario");
    assert!(reports[0]["_id"].is_string());
    fixture.cleanup().await;
}

#[tokio::test]
async fn test_unreachable_server_pings_disconnected() {
    let config = MongoBackendConfig::new("mongodb://127.0.0.1:1")
        .with_server_selection_timeout_ms(200);
    let backend = MongoBackend::connect(config).await.unwrap();

    let status = backend.ping().await;
    assert!(!status.connected);
    assert!(backend.list_all().await.is_err());
}
