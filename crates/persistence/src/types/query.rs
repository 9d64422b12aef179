//! Equality queries over case records.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A single `field == value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    pub field: String,
    pub value: Value,
}

/// A conjunction of equality conditions on top-level fields.
///
/// An empty query matches every record.
///
/// # Examples
///
/// ```
/// use kuntur_persistence::types::CaseQuery;
/// use serde_json::json;
///
/// let query = CaseQuery::new().with_field("id_alarma", "AL1");
/// let record = json!({"id_caso": "CASO-0001", "id_alarma": "AL1"});
///
/// assert!(query.matches(record.as_object().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseQuery {
    conditions: Vec<FieldCondition>,
}

impl CaseQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(FieldCondition {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[FieldCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns true if every condition holds for the given record.
    ///
    /// A field absent from the record never matches.
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        self.conditions
            .iter()
            .all(|c| record.get(&c.field) == Some(&c.value))
    }
}

/// Optional lookup filters accepted by the repository.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaseFilters {
    #[serde(default)]
    pub id_caso: Option<String>,
    #[serde(default)]
    pub id_alarma: Option<String>,
}

impl CaseFilters {
    pub fn by_case(id_caso: impl Into<String>) -> Self {
        Self {
            id_caso: Some(id_caso.into()),
            ..Self::default()
        }
    }

    pub fn by_alarm(id_alarma: impl Into<String>) -> Self {
        Self {
            id_alarma: Some(id_alarma.into()),
            ..Self::default()
        }
    }

    /// Builds the equality query for the non-empty filters.
    pub fn to_query(&self) -> CaseQuery {
        let mut query = CaseQuery::new();
        if let Some(id_caso) = self.id_caso.as_deref().filter(|v| !v.is_empty()) {
            query = query.with_field("id_caso", id_caso);
        }
        if let Some(id_alarma) = self.id_alarma.as_deref().filter(|v| !v.is_empty()) {
            query = query.with_field("id_alarma", id_alarma);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = CaseQuery::new();
        assert!(query.is_empty());
        assert!(query.matches(&record(json!({"id_caso": "CASO-0001"}))));
        assert!(query.matches(&Map::new()));
    }

    #[test]
    fn test_conjunction() {
        let query = CaseQuery::new()
            .with_field("id_caso", "CASO-0002")
            .with_field("id_alarma", "AL1");

        assert!(query.matches(&record(json!({"id_caso": "CASO-0002", "id_alarma": "AL1"}))));
        assert!(!query.matches(&record(json!({"id_caso": "CASO-0002", "id_alarma": "AL2"}))));
        assert!(!query.matches(&record(json!({"id_alarma": "AL1"}))));
    }

    #[test]
    fn test_equality_is_type_sensitive() {
        let query = CaseQuery::new().with_field("cedula_agente", "1723456789");
        assert!(!query.matches(&record(json!({"cedula_agente": 1723456789}))));
    }

    #[test]
    fn test_filters_skip_empty_strings() {
        let filters = CaseFilters {
            id_caso: Some(String::new()),
            id_alarma: Some("AL1".to_string()),
        };
        let query = filters.to_query();

        assert_eq!(query.conditions().len(), 1);
        assert_eq!(query.conditions()[0].field, "id_alarma");
    }

    #[test]
    fn test_default_filters_build_empty_query() {
        assert!(CaseFilters::default().to_query().is_empty());
        assert!(!CaseFilters::by_case("CASO-0001").to_query().is_empty());
    }
}
