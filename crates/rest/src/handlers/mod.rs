//! HTTP request handlers.
//!
//! - [`cases`] - Create, list and read cases
//! - [`health`] - Health check endpoint
//! - [`migration`] - File store to document store migration
//! - [`reports`] - Report listing
//! - [`home`] - Documentation page

pub mod cases;
pub mod health;
pub mod home;
pub mod migration;
pub mod reports;

// Re-export handlers for convenience
pub use cases::{create_case_handler, get_case_handler, list_cases_handler};
pub use health::health_handler;
pub use home::home_handler;
pub use migration::migrate_handler;
pub use reports::reports_handler;
