//! Entity-to-table contract for translated records.
//!
//! # Responsibility
//! - Describe, per entity type, how rows split across base and translation
//!   tables.
//! - Replace dynamic per-field access with a typed mapping selected at
//!   compile time.
//!
//! # Invariants
//! - `translated_fields` is the complete copy list: columns absent from it
//!   belong exclusively to the base table.
//! - `primary_key` and `foreign_key` are integer columns joined 1:1.

use rusqlite::types::Value;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric identifier of a base-table row.
pub type RecordId = i64;

/// Static description of how an entity splits across two tables.
///
/// One instance exists per entity type, referenced from
/// [`Translatable::mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationMapping {
    /// Table holding locale-independent columns.
    pub base_table: &'static str,
    /// Primary key column of the base table.
    pub primary_key: &'static str,
    /// Table holding locale-dependent columns, one row per (id, locale).
    pub translation_table: &'static str,
    /// Column of the translation table referencing the base primary key.
    pub foreign_key: &'static str,
    /// Columns copied into the translation table on save.
    pub translated_fields: &'static [&'static str],
}

/// Entity-level constraint violation detected before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Offending field name.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value for `{}`: {}", self.field, self.message)
    }
}

impl Error for ValidationError {}

/// Contract implemented by every entity stored through the translated
/// accessor.
///
/// Implementations provide column/value pairs instead of exposing fields
/// dynamically, so the copy list is fixed at compile time.
pub trait Translatable: Sized {
    /// Returns the table split description for this entity type.
    fn mapping() -> &'static TranslationMapping;

    /// Returns the base-row id, when the entity was already persisted.
    fn id(&self) -> Option<RecordId>;

    /// Stores the id assigned by the first base-row insert.
    fn set_id(&mut self, id: RecordId);

    /// Base-table column/value pairs, excluding the primary key.
    ///
    /// May be empty for entities whose base table carries only the key.
    fn base_values(&self) -> Vec<(&'static str, Value)>;

    /// Translation-table column/value pairs.
    ///
    /// Pairs whose column is not listed in `mapping().translated_fields`
    /// are ignored by the accessor; listed columns without a pair persist
    /// as NULL.
    fn translated_values(&self) -> Vec<(&'static str, Value)>;

    /// Rebuilds the entity from one merged (base JOIN translation) row.
    ///
    /// # Errors
    /// Returns the underlying column access error when the row shape does
    /// not match the mapping.
    fn from_merged_row(row: &Row<'_>) -> Result<Self, rusqlite::Error>;

    /// Checks entity-level constraints before persistence.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
