//! MongoDB backend implementation.
//!
//! Stores one document per case in a collection with a unique index on
//! `id_caso`, and exposes a read-only listing of the reports collection kept
//! in the same database.
//!
//! # Example
//!
//! ```no_run
//! use kuntur_persistence::backends::mongodb::{MongoBackend, MongoBackendConfig};
//! use kuntur_persistence::core::{Backend, CaseStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoBackendConfig::new("mongodb://localhost:27017")
//!     .with_database("kuntur");
//! let backend = MongoBackend::connect(config).await?;
//! backend.initialize().await?;
//!
//! let status = backend.ping().await;
//! println!("connected: {}", status.connected);
//! # Ok(())
//! # }
//! ```

mod backend;
mod convert;
mod reports;
mod storage;

pub use backend::{MongoBackend, MongoBackendConfig};
