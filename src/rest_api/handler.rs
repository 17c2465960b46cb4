//! # Posts Handler
//!
//! Translates validated requests into parameterized statements against the
//! posts table and maps the outcome to a response or a `RestError`.
//!
//! Every operation checks out its own pooled connection and gives it back
//! when the guard drops, on success and on every error path. Identifiers
//! and field values are always bound, never spliced into SQL text.

use sqlx::any::AnyQueryResult;
use sqlx::AnyConnection;

use crate::db::Database;
use crate::observability::Event;
use crate::schema::{Post, PostField, PostRecord, PostUpdate, UpdateSet};

use super::errors::{RestError, RestResult};
use super::response::{CreatedResponse, MessageResponse};

pub const SELECT_ALL_SQL: &str = "SELECT id, title, body, image FROM posts";
pub const SELECT_ONE_SQL: &str = "SELECT id, title, body, image FROM posts WHERE id = ?";
pub const INSERT_SQL: &str = "INSERT INTO posts (title, body, image) VALUES (?, ?, ?)";
pub const DELETE_SQL: &str = "DELETE FROM posts WHERE id = ?";

const SQLITE_LAST_ID_SQL: &str = "SELECT last_insert_rowid()";
const MYSQL_LAST_ID_SQL: &str = "SELECT CAST(LAST_INSERT_ID() AS SIGNED)";

/// Render the UPDATE statement for a set of assignments.
///
/// Column names come from `PostField` only; the statement binds one value
/// per assignment followed by the identifier.
pub fn update_statement(set: &UpdateSet) -> String {
    let assignments: Vec<String> = set
        .fields()
        .map(|field: PostField| format!("{} = ?", field.column()))
        .collect();
    format!("UPDATE posts SET {} WHERE id = ?", assignments.join(", "))
}

/// Handler set for the posts resource
#[derive(Debug, Clone)]
pub struct PostHandler {
    db: Database,
}

impl PostHandler {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List every post in storage order
    pub async fn list(&self) -> RestResult<Vec<PostRecord>> {
        let mut conn = self.db.acquire().await.map_err(storage_failure)?;

        let rows = sqlx::query_as::<_, PostRecord>(SELECT_ALL_SQL)
            .fetch_all(&mut *conn)
            .await
            .map_err(storage_failure)?;

        Ok(rows)
    }

    /// Fetch one post by identifier
    pub async fn get(&self, id: i64) -> RestResult<PostRecord> {
        let mut conn = self.db.acquire().await.map_err(storage_failure)?;

        let row = sqlx::query_as::<_, PostRecord>(SELECT_ONE_SQL)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(storage_failure)?;

        row.ok_or_else(|| not_found(id))
    }

    /// Insert a new post; the identifier is assigned by storage
    pub async fn create(&self, post: Post) -> RestResult<CreatedResponse> {
        post.validate().map_err(|e| rejected(e.into()))?;

        let mut conn = self.db.acquire().await.map_err(storage_failure)?;

        let mut query = sqlx::query(INSERT_SQL);
        for (_, value) in post.values() {
            query = query.bind(value);
        }
        let result: AnyQueryResult = query.execute(&mut *conn).await.map_err(storage_failure)?;

        if result.rows_affected() == 0 {
            return Err(storage_failure("insert affected no rows"));
        }
        let id = match result.last_insert_id() {
            Some(id) => id,
            None => last_insert_id(&mut conn).await.map_err(storage_failure)?,
        };

        tracing::info!(event = %Event::PostCreated, id, "post created");
        Ok(CreatedResponse::new(id))
    }

    /// Replace the present fields of an existing post.
    ///
    /// An empty payload is rejected before any statement is issued. A
    /// rowcount of zero means the identifier does not exist.
    pub async fn update(&self, id: i64, update: PostUpdate) -> RestResult<MessageResponse> {
        let set = update.into_update_set().map_err(|e| rejected(e.into()))?;
        let sql = update_statement(&set);

        let mut conn = self.db.acquire().await.map_err(storage_failure)?;

        let mut query = sqlx::query(&sql);
        for (_, value) in set.assignments() {
            query = query.bind(value.as_str());
        }
        let result = query
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(storage_failure)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!(event = %Event::PostUpdated, id, fields = set.assignments().len(), "post updated");
        Ok(MessageResponse::updated())
    }

    /// Remove a post. Existence is inferred from the rowcount alone.
    pub async fn delete(&self, id: i64) -> RestResult<MessageResponse> {
        let mut conn = self.db.acquire().await.map_err(storage_failure)?;

        let result = sqlx::query(DELETE_SQL)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(storage_failure)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!(event = %Event::PostDeleted, id, "post deleted");
        Ok(MessageResponse::deleted())
    }
}

/// Ask the connection for the id it generated last.
///
/// Used when the driver's query result carries no id, which is the case for
/// SQLite behind the `Any` driver. Must run on the connection that issued
/// the INSERT.
async fn last_insert_id(conn: &mut AnyConnection) -> Result<i64, sqlx::Error> {
    let sql = if conn.backend_name().eq_ignore_ascii_case("sqlite") {
        SQLITE_LAST_ID_SQL
    } else {
        MYSQL_LAST_ID_SQL
    };
    sqlx::query_scalar::<_, i64>(sql).fetch_one(conn).await
}

fn storage_failure(err: impl Into<StorageCause>) -> RestError {
    let StorageCause(message) = err.into();
    let err = RestError::Storage(message);
    tracing::error!(event = %Event::StorageFailure, kind = err.kind(), error = %err);
    err
}

fn not_found(id: i64) -> RestError {
    let err = RestError::NotFound;
    tracing::debug!(event = %Event::RequestRejected, kind = err.kind(), id, "post not found");
    err
}

fn rejected(err: RestError) -> RestError {
    tracing::debug!(event = %Event::RequestRejected, kind = err.kind(), error = %err);
    err
}

/// Message of a storage-side failure
struct StorageCause(String);

impl From<sqlx::Error> for StorageCause {
    fn from(err: sqlx::Error) -> Self {
        StorageCause(RestError::from(err).to_string())
    }
}

impl From<&str> for StorageCause {
    fn from(message: &str) -> Self {
        StorageCause(message.to_string())
    }
}
