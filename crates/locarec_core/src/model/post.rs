//! Post entity: base `post` table plus per-locale `post_lang` rows.
//!
//! # Invariants
//! - `title` lives in the base table and is shared by every locale.
//! - `body` lives in the translation table, one value per locale.
//! - `title` must not be blank.

use crate::model::translatable::{RecordId, Translatable, TranslationMapping, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

const POST_MAPPING: TranslationMapping = TranslationMapping {
    base_table: "post",
    primary_key: "id",
    translation_table: "post_lang",
    foreign_key: "post_id",
    translated_fields: &["body"],
};

/// Merged view of one post under one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Base-row id; `None` until the first save.
    pub id: Option<RecordId>,
    /// Locale-independent title.
    pub title: String,
    /// Locale-dependent body text.
    pub body: String,
}

impl Post {
    /// Creates an unsaved post.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
        }
    }
}

impl Translatable for Post {
    fn mapping() -> &'static TranslationMapping {
        &POST_MAPPING
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn base_values(&self) -> Vec<(&'static str, Value)> {
        vec![("title", Value::Text(self.title.clone()))]
    }

    fn translated_values(&self) -> Vec<(&'static str, Value)> {
        vec![("body", Value::Text(self.body.clone()))]
    }

    fn from_merged_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: Some(row.get("id")?),
            title: row.get("title")?,
            body: row.get("body")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError {
                field: "title",
                message: "title cannot be blank".to_string(),
            });
        }
        Ok(())
    }
}
