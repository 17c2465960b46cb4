//! Resource schema for posts
//!
//! Defines the valid shape of inbound data and separates full-create from
//! partial-update semantics.
//!
//! # Rules
//!
//! - A create payload needs `title`, `body` and `image`, each non-empty
//! - An update payload needs at least one present field
//! - Reads and deletes take only the path identifier and have no schema

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use types::{Post, PostField, PostRecord, PostUpdate, UpdateSet};
