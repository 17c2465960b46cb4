//! # Posts REST API Module
//!
//! Provides HTTP endpoints for CRUD operations on the posts table.

pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::PostHandler;
pub use response::{CreatedResponse, MessageResponse};
pub use server::{posts_routes, PostsState};
