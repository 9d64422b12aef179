//! Case record types.
//!
//! This module defines [`Case`], the stored record, and [`NewCase`], the
//! caller-supplied fields a case is created from.
//!
//! A case is an open JSON object keyed by `id_caso`. The required fields must
//! be present when a case is opened; their values, and any other field the
//! caller sends, are stored verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Fields a caller must supply when opening a case, in reporting order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "id_alarma",
    "nombre_agente",
    "cedula_agente",
    "nombre_victima",
    "cedula_victima",
    "informe_policial",
];

/// Fields stamped by the repository. Caller values for these are discarded.
pub const ASSIGNED_FIELDS: [&str; 3] = ["id_caso", "fecha_creacion", "estado"];

/// State every case is opened in.
pub const STATUS_OPEN: &str = "Abierto";

/// A stored case record.
///
/// Only `id_caso` is typed. Every other field, the required ones included,
/// is held as the JSON value the caller supplied; presence is checked at
/// creation, content never is.
///
/// # Examples
///
/// ```
/// use kuntur_persistence::types::{Case, NewCase};
/// use serde_json::json;
///
/// let fields = json!({
///     "id_alarma": "AL23072504",
///     "nombre_agente": "Juan Pérez",
///     "cedula_agente": 1723456789,
///     "nombre_victima": "María López",
///     "cedula_victima": "1712345678",
///     "informe_policial": "Robo a mano armada",
///     "sector": "Centro Histórico"
/// });
/// let new_case = NewCase::from_fields(fields.as_object().unwrap().clone()).unwrap();
/// let case = Case::open("CASO-0001", new_case, "2025-07-23T10:30:15-05:00");
///
/// assert_eq!(case.id_caso(), "CASO-0001");
/// assert_eq!(case.estado(), Some("Abierto"));
/// assert_eq!(case.get("cedula_agente"), Some(&json!(1723456789)));
/// assert_eq!(case.fields()["sector"], "Centro Histórico");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Sequential identifier, `CASO-NNNN`.
    id_caso: String,

    /// Every other stored field, plus any backend surrogate key rendered as
    /// a string.
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Case {
    /// Opens a new case from caller fields, stamping creation time and the
    /// open state.
    pub fn open(
        id_caso: impl Into<String>,
        new_case: NewCase,
        fecha_creacion: impl Into<String>,
    ) -> Self {
        let mut fields = new_case.fields;
        fields.insert(
            "fecha_creacion".to_string(),
            Value::String(fecha_creacion.into()),
        );
        fields.insert("estado".to_string(), Value::String(STATUS_OPEN.to_string()));
        Self {
            id_caso: id_caso.into(),
            fields,
        }
    }

    /// Reads a case from a stored JSON object.
    ///
    /// Any object with a string `id_caso` is a case.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Renders the case as a JSON object.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn id_caso(&self) -> &str {
        &self.id_caso
    }

    /// Returns a stored field other than `id_caso`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn id_alarma(&self) -> Option<&Value> {
        self.get("id_alarma")
    }

    pub fn fecha_creacion(&self) -> Option<&str> {
        self.get("fecha_creacion").and_then(Value::as_str)
    }

    pub fn estado(&self) -> Option<&str> {
        self.get("estado").and_then(Value::as_str)
    }

    /// Returns every field except `id_caso`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Caller fields a case is opened from.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCase {
    fields: Map<String, Value>,
}

impl NewCase {
    /// Checks a flat field map supplied by a caller.
    ///
    /// Every absent required field is reported at once. Values are kept as
    /// sent, whatever their JSON type. Values for [`ASSIGNED_FIELDS`] are
    /// dropped.
    ///
    /// # Errors
    ///
    /// * `ValidationError::MissingRequiredFields` - one or more required fields absent
    pub fn from_fields(mut fields: Map<String, Value>) -> Result<Self, ValidationError> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|name| !fields.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequiredFields { fields: missing });
        }

        for name in ASSIGNED_FIELDS {
            fields.remove(name);
        }

        Ok(Self { fields })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
