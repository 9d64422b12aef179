//! File backend implementation.
//!
//! Stores every case in a single pretty-printed JSON array. Suited to
//! development and single-process deployments.
//!
//! # Behavior
//!
//! - A missing file reads as an empty store; [`initialize`] creates it.
//! - A file that is not a JSON array reads as empty and is not rewritten by
//!   reads.
//! - Entries that are not valid cases are skipped by reads and kept verbatim
//!   when the file is rewritten.
//! - Inserts serialize through an in-process lock and replace the file by
//!   atomic rename.
//!
//! [`initialize`]: crate::core::Backend::initialize
//!
//! # Example
//!
//! ```no_run
//! use kuntur_persistence::backends::file::FileBackend;
//! use kuntur_persistence::core::{Backend, CaseStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = FileBackend::new("./static/data/casos.json");
//! backend.initialize().await?;
//!
//! let cases = backend.list_all().await?;
//! println!("{} cases on file", cases.len());
//! # Ok(())
//! # }
//! ```

mod backend;
mod storage;

pub(crate) use backend::FileContents;
pub use backend::{DEFAULT_DATA_FILE, FileBackend, FileBackendConfig};
