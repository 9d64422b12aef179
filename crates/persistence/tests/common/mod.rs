//! Test infrastructure for the persistence layer.

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{Map, Value, json};
use tempfile::TempDir;

use kuntur_persistence::backends::file::FileBackend;
use kuntur_persistence::core::Backend;
use kuntur_persistence::types::{Case, NewCase};

/// A file backend in a private temporary directory.
pub struct FileFixture {
    pub backend: FileBackend,
    pub path: PathBuf,
    _dir: TempDir,
}

/// Creates an initialized file backend.
pub async fn create_file_backend() -> FileFixture {
    let fixture = uninitialized_file_backend();
    fixture
        .backend
        .initialize()
        .await
        .expect("Failed to initialize file backend");
    fixture
}

/// Creates a file backend whose file does not exist yet.
pub fn uninitialized_file_backend() -> FileFixture {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data").join("casos.json");
    FileFixture {
        backend: FileBackend::new(&path),
        path,
        _dir: dir,
    }
}

/// Complete creation fields for the given alarm.
pub fn case_fields(id_alarma: &str) -> Map<String, Value> {
    let value = json!({
        "id_alarma": id_alarma,
        "nombre_agente": "Juan Pérez",
        "cedula_agente": "1723456789",
        "nombre_victima": "María López",
        "cedula_victima": "1712345678",
        "informe_policial": "Descripción del caso"
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// A fully formed case, as migration or a direct insert would see it.
pub fn sample_case(id_caso: &str, id_alarma: &str) -> Case {
    let fields = NewCase::from_fields(case_fields(id_alarma)).expect("valid fields");
    Case::open(id_caso, fields, "2025-07-23T10:30:15-05:00")
}

/// A record as stored by earlier deployments, with a numeric cedula.
pub fn legacy_record(id_caso: &str, id_alarma: &str) -> Value {
    json!({
        "id_caso": id_caso,
        "id_alarma": id_alarma,
        "nombre_agente": "Juan Pérez",
        "cedula_agente": 1723456789,
        "nombre_victima": "María López",
        "cedula_victima": null,
        "informe_policial": "Descripción del caso",
        "fecha_creacion": "2025-07-23T10:30:15.123456",
        "estado": "Abierto"
    })
}

/// Writes `entries` to `path` as a JSON array.
pub async fn write_raw(path: &PathBuf, entries: &[Value]) {
    let content = serde_json::to_string_pretty(entries).expect("serializable entries");
    tokio::fs::write(path, content)
        .await
        .expect("Failed to write case file");
}

/// Reads the raw JSON array stored at `path`.
pub async fn read_raw(path: &PathBuf) -> Vec<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .expect("Failed to read case file");
    serde_json::from_str(&content).expect("Case file is not a JSON array")
}
