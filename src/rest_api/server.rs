//! # REST API Routes
//!
//! Axum routes for the posts resource:
//!
//! - `GET /` - list all posts
//! - `POST /posts/` - create a post
//! - `GET /posts/:post_id` - read one post
//! - `PUT /posts/:post_id` - partially update a post
//! - `DELETE /posts/:post_id` - delete a post

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};

use crate::schema::{Post, PostRecord, PostUpdate};

use super::errors::RestResult;
use super::handler::PostHandler;
use super::response::{CreatedResponse, MessageResponse};

/// Shared state type
pub type PostsState = Arc<PostHandler>;

/// Build the posts router
pub fn posts_routes(handler: PostHandler) -> Router {
    let state: PostsState = Arc::new(handler);

    Router::new()
        .route("/", get(list_handler))
        .route("/posts/", post(create_handler))
        .route("/posts", post(create_handler))
        .route(
            "/posts/:post_id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

/// List posts handler
async fn list_handler(State(handler): State<PostsState>) -> RestResult<Json<Vec<PostRecord>>> {
    Ok(Json(handler.list().await?))
}

/// Create post handler. Answers 200 with the generated id.
async fn create_handler(
    State(handler): State<PostsState>,
    body: Result<Json<Post>, JsonRejection>,
) -> RestResult<Json<CreatedResponse>> {
    let Json(post) = body?;
    Ok(Json(handler.create(post).await?))
}

/// Get single post handler
async fn get_handler(
    State(handler): State<PostsState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> RestResult<Json<PostRecord>> {
    let Path(id) = post_id?;
    Ok(Json(handler.get(id).await?))
}

/// Update post handler
async fn update_handler(
    State(handler): State<PostsState>,
    post_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PostUpdate>, JsonRejection>,
) -> RestResult<Json<MessageResponse>> {
    let Path(id) = post_id?;
    let Json(update) = body?;
    Ok(Json(handler.update(id, update).await?))
}

/// Delete post handler
async fn delete_handler(
    State(handler): State<PostsState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> RestResult<Json<MessageResponse>> {
    let Path(id) = post_id?;
    Ok(Json(handler.delete(id).await?))
}
