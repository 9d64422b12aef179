//! Storage backend implementations.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | File | (always) | Single JSON array on local disk, great for development |
//! | MongoDB | `mongodb` | Document store with a unique index on `id_caso` |
//!
//! # Example
//!
//! ```no_run
//! use kuntur_persistence::backends::file::FileBackend;
//!
//! let backend = FileBackend::new("./static/data/casos.json");
//! ```

pub mod file;

#[cfg(feature = "mongodb")]
pub mod mongodb;
