//! Core types for the persistence layer.
//!
//! - [`Case`], [`NewCase`] - the stored record and its validated input
//! - [`CaseQuery`], [`CaseFilters`] - equality queries over records
//!
//! # Examples
//!
//! ## Building a Query
//!
//! ```
//! use kuntur_persistence::types::{CaseFilters, CaseQuery};
//!
//! let query = CaseQuery::new()
//!     .with_field("id_alarma", "AL23072504")
//!     .with_field("estado", "Abierto");
//! assert_eq!(query.conditions().len(), 2);
//!
//! // Empty filters are dropped.
//! let filters = CaseFilters {
//!     id_caso: Some(String::new()),
//!     id_alarma: Some("AL23072504".to_string()),
//! };
//! assert_eq!(filters.to_query().conditions().len(), 1);
//! ```

mod case;
mod query;

pub use case::{ASSIGNED_FIELDS, Case, NewCase, REQUIRED_FIELDS, STATUS_OPEN};
pub use query::{CaseFilters, CaseQuery, FieldCondition};
