//! Route configuration for the case REST API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod case_routes;

pub use case_routes::create_routes;
