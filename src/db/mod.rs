//! # Database Module
//!
//! Environment-driven connection settings and the shared pool handle used by
//! the resource handlers.

pub mod config;
pub mod pool;

pub use config::DatabaseConfig;
pub use pool::{Database, SCHEMA_CHECK_SQL};
