//! Kuntur Detector Case Persistence Layer
//!
//! This crate stores and retrieves the case records opened by agents in
//! response to alerts. It provides sequential case identifiers, two
//! interchangeable storage backends, a repository that ties them together,
//! and a one-shot migration from the file store to the document store.
//!
//! # Backend Features
//!
//! Enable backends with feature flags in `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! kuntur-persistence = { version = "0.1", default-features = false }
//! ```
//!
//! Available backend features:
//! - the file backend is always available
//! - `mongodb` (default) - MongoDB document storage
//!
//! # Architecture
//!
//! - [`types`] - Case record, validated input, equality queries
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits and the identifier generator
//! - [`backends`] - Backend implementations (file, MongoDB)
//! - [`repository`] - The entry point used by the HTTP layer
//! - [`migration`] - File store to document store migration
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use kuntur_persistence::backends::file::FileBackend;
//! use kuntur_persistence::core::Backend;
//! use kuntur_persistence::repository::CaseRepository;
//! use kuntur_persistence::types::CaseFilters;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(FileBackend::new("./static/data/casos.json"));
//! backend.initialize().await?;
//!
//! let repo = CaseRepository::new(backend);
//! let fields = json!({
//!     "id_alarma": "AL23072504",
//!     "nombre_agente": "Juan Pérez",
//!     "cedula_agente": "1723456789",
//!     "nombre_victima": "María López",
//!     "cedula_victima": "1712345678",
//!     "informe_policial": "Descripción del caso"
//! });
//! let case = repo.create_case(fields.as_object().cloned().unwrap_or_default()).await?;
//! println!("opened {}", case.id_caso());
//!
//! let same_alarm = repo.get_cases(&CaseFilters::by_alarm("AL23072504")).await?;
//! assert!(!same_alarm.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod migration;
pub mod repository;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use migration::MigrationReport;
pub use repository::CaseRepository;
pub use types::{Case, CaseFilters, CaseQuery, NewCase};

// Re-export core traits
pub use core::{Backend, BackendKind, CaseStorage, PingStatus};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
