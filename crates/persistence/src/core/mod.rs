//! Core storage traits and abstractions.
//!
//! - [`Backend`] - driver lifecycle (scoped resource, initialization, health)
//! - [`CaseStorage`] - record operations
//! - [`identifier`] - sequential `CASO-NNNN` identifiers
//!
//! # Example: Implementing a Storage Backend
//!
//! ```ignore
//! use async_trait::async_trait;
//! use kuntur_persistence::core::{CaseStorage, PingStatus};
//! use kuntur_persistence::error::StorageResult;
//! use kuntur_persistence::types::{Case, CaseQuery};
//!
//! struct MyBackend {
//!     // ... backend-specific fields
//! }
//!
//! #[async_trait]
//! impl CaseStorage for MyBackend {
//!     fn backend_name(&self) -> &'static str {
//!         "my-backend"
//!     }
//!
//!     async fn insert(&self, case: Case) -> StorageResult<Case> {
//!         // Implementation...
//!         todo!()
//!     }
//!
//!     // ... implement other required methods
//! }
//! ```

pub mod backend;
pub mod identifier;
pub mod storage;

pub use backend::{Backend, BackendKind};
pub use identifier::{CASE_ID_PREFIX, format_case_id, next_case_id, parse_case_number};
pub use storage::{CaseBuilder, CaseStorage, PingStatus};
