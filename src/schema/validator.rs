//! Payload validation
//!
//! Validation runs before any storage call and does not mutate its input
//! beyond consuming it into an `UpdateSet`.

use super::errors::{SchemaError, SchemaResult};
use super::types::{Post, PostField, PostUpdate, UpdateSet};

impl Post {
    /// Rejects the payload if any field is empty.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.title.is_empty() || self.body.is_empty() || self.image.is_empty() {
            return Err(SchemaError::fields_required());
        }
        Ok(())
    }

    /// Field values in `PostField::ALL` order
    pub fn values(&self) -> [(PostField, &str); 3] {
        [
            (PostField::Title, self.title.as_str()),
            (PostField::Body, self.body.as_str()),
            (PostField::Image, self.image.as_str()),
        ]
    }
}

impl PostUpdate {
    /// Explicit field-to-value mapping, absent fields included
    pub fn entries(self) -> [(PostField, Option<String>); 3] {
        [
            (PostField::Title, self.title),
            (PostField::Body, self.body),
            (PostField::Image, self.image),
        ]
    }

    /// Returns true if no field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.image.is_none()
    }

    /// Filters the payload down to its present fields.
    ///
    /// # Errors
    ///
    /// Returns POSTS_NO_UPDATE_DATA if every field is absent.
    pub fn into_update_set(self) -> SchemaResult<UpdateSet> {
        let assignments: Vec<_> = self
            .entries()
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect();

        if assignments.is_empty() {
            return Err(SchemaError::no_update_data());
        }
        Ok(UpdateSet::from_assignments(assignments))
    }
}
