//! Conversions between BSON documents and case records.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use mongodb::error::{Error, ErrorKind, WriteFailure};
use serde_json::Value;

use crate::error::StorageResult;
use crate::types::{Case, CaseQuery};

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Renders a document as relaxed extended JSON with `_id` as a plain string.
pub(crate) fn document_to_json(mut document: Document) -> Value {
    if let Some(id) = document.remove("_id") {
        document.insert("_id", id_to_string(id));
    }
    Bson::Document(document).into_relaxed_extjson()
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

/// Reads a case from a stored document.
pub(crate) fn document_to_case(document: Document) -> Result<Case, serde_json::Error> {
    Case::from_value(document_to_json(document))
}

/// Builds the document to insert for a case.
///
/// The surrogate key is left to the server; a string `_id` carried in the
/// pass-through fields is dropped.
pub(crate) fn case_to_document(case: &Case) -> StorageResult<Document> {
    let mut document = mongodb::bson::to_document(case)?;
    document.remove("_id");
    Ok(document)
}

/// Builds an equality filter for a query.
///
/// Conditions on `_id` given as a hex string match the stored ObjectId.
pub(crate) fn query_to_filter(query: &CaseQuery) -> StorageResult<Document> {
    let mut filter = Document::new();
    for condition in query.conditions() {
        let value = match (&condition.field[..], &condition.value) {
            ("_id", Value::String(hex)) => match ObjectId::parse_str(hex) {
                Ok(oid) => Bson::ObjectId(oid),
                Err(_) => Bson::String(hex.clone()),
            },
            _ => mongodb::bson::to_bson(&condition.value)?,
        };
        filter.insert(condition.field.clone(), value);
    }
    Ok(filter)
}

/// Returns true if the error is a unique index violation.
pub(crate) fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    fn stored_document(oid: ObjectId) -> Document {
        doc! {
            "_id": oid,
            "id_caso": "CASO-0001",
            "id_alarma": "AL1",
            "nombre_agente": "Juan Pérez",
            "cedula_agente": "1723456789",
            "nombre_victima": "María López",
            "cedula_victima": "1712345678",
            "informe_policial": "Robo",
            "fecha_creacion": "2025-07-23T10:30:15-05:00",
            "estado": "Abierto",
            "prioridad": 2_i32,
        }
    }

    #[test]
    fn test_document_to_case_stringifies_id() {
        let oid = ObjectId::new();
        let case = document_to_case(stored_document(oid)).unwrap();

        assert_eq!(case.id_caso(), "CASO-0001");
        assert_eq!(case.fields()["_id"], json!(oid.to_hex()));
        assert_eq!(case.fields()["prioridad"], json!(2));
    }

    #[test]
    fn test_case_to_document_drops_surrogate_key() {
        let oid = ObjectId::new();
        let case = document_to_case(stored_document(oid)).unwrap();

        let document = case_to_document(&case).unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("id_caso").unwrap(), "CASO-0001");
        assert_eq!(document.get_str("estado").unwrap(), "Abierto");
    }

    #[test]
    fn test_document_to_json_keeps_non_case_documents() {
        let value = document_to_json(doc! { "_id": "informe-1", "resumen": "x" });
        assert_eq!(value, json!({"_id": "informe-1", "resumen": "x"}));
    }

    #[test]
    fn test_query_to_filter() {
        let oid = ObjectId::new();
        let query = CaseQuery::new()
            .with_field("id_alarma", "AL1")
            .with_field("_id", oid.to_hex());

        let filter = query_to_filter(&query).unwrap();
        assert_eq!(filter.get_str("id_alarma").unwrap(), "AL1");
        assert_eq!(filter.get_object_id("_id").unwrap(), oid);
    }

    #[test]
    fn test_empty_query_is_empty_filter() {
        assert!(query_to_filter(&CaseQuery::new()).unwrap().is_empty());
    }
}
