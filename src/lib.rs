//! posts-api - CRUD HTTP service over a relational posts table
//!
//! Requests flow linearly: the HTTP layer parses method, path and body, the
//! [`schema`] module validates the payload, and [`rest_api::PostHandler`]
//! runs one parameterized statement and maps its outcome to a response.

pub mod cli;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod schema;
