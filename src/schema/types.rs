//! Post payload and record types
//!
//! `Post` is the create payload, `PostUpdate` the sparse update payload and
//! `PostRecord` the row shape returned by reads.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::{FromRow, Row};

/// Create payload.
///
/// Omitted fields deserialize to the empty string so that "missing" and
/// "empty" are rejected by the same check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: String,
}

impl Post {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            image: image.into(),
        }
    }
}

/// Partial update payload.
///
/// `None` means the field was omitted (or sent as `null`). `Some("")` is a
/// present field and is written as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A persisted post as read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub image: String,
}

impl<'r> FromRow<'r, AnyRow> for PostRecord {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: text_column(row, "title")?,
            body: text_column(row, "body")?,
            image: text_column(row, "image")?,
        })
    }
}

/// Decode a text column.
///
/// MySQL sends `TEXT` columns with the BLOB wire type, which the `Any`
/// driver surfaces as bytes rather than text. Those bytes must be UTF-8.
fn text_column(row: &AnyRow, column: &str) -> Result<String, sqlx::Error> {
    match row.try_get::<String, _>(column) {
        Ok(text) => Ok(text),
        Err(sqlx::Error::ColumnDecode { .. }) => {
            let bytes: Vec<u8> = row.try_get(column)?;
            String::from_utf8(bytes).map_err(|e| sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(e),
            })
        }
        Err(e) => Err(e),
    }
}

/// Writable post columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    Title,
    Body,
    Image,
}

impl PostField {
    /// All writable fields in column order
    pub const ALL: [PostField; 3] = [PostField::Title, PostField::Body, PostField::Image];

    /// Column name in the posts table
    pub fn column(&self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Body => "body",
            PostField::Image => "image",
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Column assignments computed from a `PostUpdate`.
///
/// Never empty: construction goes through `PostUpdate::into_update_set`,
/// which rejects payloads without a present field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSet {
    assignments: Vec<(PostField, String)>,
}

impl UpdateSet {
    pub(crate) fn from_assignments(assignments: Vec<(PostField, String)>) -> Self {
        debug_assert!(!assignments.is_empty());
        Self { assignments }
    }

    pub fn assignments(&self) -> &[(PostField, String)] {
        &self.assignments
    }

    pub fn fields(&self) -> impl Iterator<Item = PostField> + '_ {
        self.assignments.iter().map(|(field, _)| *field)
    }
}
