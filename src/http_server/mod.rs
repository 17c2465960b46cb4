//! # HTTP Server Module
//!
//! Serves the posts resource over HTTP.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/` and `/posts/*` - Posts CRUD

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::{ConfigLoadError, HttpServerConfig};
pub use server::HttpServer;
