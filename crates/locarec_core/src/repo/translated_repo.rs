//! Translated-record accessor contract and SQLite implementation.
//!
//! # Responsibility
//! - Merge base rows with their per-locale translation rows on read.
//! - Keep base write and translation upsert inside one transaction on save.
//!
//! # Invariants
//! - At most one translation row exists per (base id, locale); the save
//!   path updates in place instead of inserting duplicates.
//! - Only columns named in the entity mapping are copied into the
//!   translation table.
//! - Select columns are table-qualified so joined column names never
//!   become ambiguous.

use crate::db::DbError;
use crate::locale::{Locale, LocaleProvider, ProcessLocaleProvider};
use crate::model::translatable::{RecordId, Translatable, TranslationMapping, ValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for translated persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` does not exist")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Locale-aware accessor interface over split base/translation storage.
pub trait TranslatedRepository<E: Translatable> {
    /// Returns the locale applied to subsequent calls: the per-instance
    /// override when set, otherwise the provider's current value.
    fn locale(&self) -> Locale;
    /// Overrides the locale for subsequent calls on this instance.
    fn set_locale(&mut self, locale: Locale);
    /// Fetches one merged record by base id under the active locale.
    fn fetch_one(&self, id: RecordId) -> RepoResult<Option<E>>;
    /// Fetches all merged records under the active locale.
    fn fetch_all(&self) -> RepoResult<Vec<E>>;
    /// Upserts the base row, then the translation row for the active
    /// locale, in one transaction. Returns the base id and assigns it back
    /// to a freshly inserted entity.
    fn save(&mut self, entity: &mut E) -> RepoResult<RecordId>;
    /// Deletes the base row; translation rows go with it via FK cascade.
    fn delete(&mut self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed translated-record accessor.
pub struct SqliteTranslatedRepository<'conn, E, P = ProcessLocaleProvider>
where
    E: Translatable,
    P: LocaleProvider,
{
    conn: &'conn mut Connection,
    provider: P,
    locale_override: Option<Locale>,
    _entity: PhantomData<E>,
}

impl<'conn, E: Translatable> SqliteTranslatedRepository<'conn, E, ProcessLocaleProvider> {
    /// Constructs an accessor using the process-wide locale setting.
    ///
    /// # Errors
    /// Returns readiness errors when the mapped tables/columns are absent.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        Self::with_provider(conn, ProcessLocaleProvider)
    }
}

impl<'conn, E: Translatable, P: LocaleProvider> SqliteTranslatedRepository<'conn, E, P> {
    /// Constructs an accessor with an explicit locale provider.
    ///
    /// # Errors
    /// Returns readiness errors when the mapped tables/columns are absent.
    pub fn with_provider(conn: &'conn mut Connection, provider: P) -> RepoResult<Self> {
        ensure_connection_ready(conn, E::mapping())?;
        Ok(Self {
            conn,
            provider,
            locale_override: None,
            _entity: PhantomData,
        })
    }

    /// Clears the per-instance locale override.
    pub fn clear_locale(&mut self) {
        self.locale_override = None;
    }
}

impl<E: Translatable, P: LocaleProvider> TranslatedRepository<E>
    for SqliteTranslatedRepository<'_, E, P>
{
    fn locale(&self) -> Locale {
        self.locale_override
            .clone()
            .unwrap_or_else(|| self.provider.current_locale())
    }

    fn set_locale(&mut self, locale: Locale) {
        self.locale_override = Some(locale);
    }

    fn fetch_one(&self, id: RecordId) -> RepoResult<Option<E>> {
        let mapping = E::mapping();
        let locale = self.locale();
        let sql = format!(
            "{} WHERE {tr}.{fk} = ?1 AND {tr}.locale = ?2;",
            merged_select_sql(mapping),
            tr = mapping.translation_table,
            fk = mapping.foreign_key,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id, locale.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(E::from_merged_row(row)?));
        }

        Ok(None)
    }

    fn fetch_all(&self) -> RepoResult<Vec<E>> {
        let mapping = E::mapping();
        let locale = self.locale();
        let sql = format!(
            "{} WHERE {tr}.locale = ?1 ORDER BY {base}.{pk} ASC;",
            merged_select_sql(mapping),
            tr = mapping.translation_table,
            base = mapping.base_table,
            pk = mapping.primary_key,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([locale.as_str()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(E::from_merged_row(row)?);
        }

        Ok(records)
    }

    fn save(&mut self, entity: &mut E) -> RepoResult<RecordId> {
        entity.validate()?;

        let mapping = E::mapping();
        let locale = self.locale();
        let base_values = entity.base_values();
        let translated = copy_translated_values(mapping, &entity.translated_values());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let id = match entity.id() {
            Some(id) => {
                upsert_base_row(&tx, mapping, id, &base_values)?;
                id
            }
            None => {
                insert_base_row(&tx, mapping, &base_values)?;
                tx.last_insert_rowid()
            }
        };

        let existing_rowid: Option<i64> = tx
            .query_row(
                &format!(
                    "SELECT rowid FROM {} WHERE {} = ?1 AND locale = ?2;",
                    mapping.translation_table, mapping.foreign_key
                ),
                params![id, locale.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match existing_rowid {
            Some(rowid) => update_translation_row(&tx, mapping, rowid, &translated)?,
            None => insert_translation_row(&tx, mapping, id, &locale, &translated)?,
        }

        tx.commit()?;
        entity.set_id(id);
        Ok(id)
    }

    fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        let mapping = E::mapping();
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                mapping.base_table, mapping.primary_key
            ),
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Builds the merged SELECT/JOIN fragment for a mapping.
///
/// All base columns plus the mapped translated columns, each qualified by
/// its table name.
fn merged_select_sql(mapping: &TranslationMapping) -> String {
    let mut columns = vec![format!("{}.*", mapping.base_table)];
    for field in mapping.translated_fields {
        columns.push(format!("{}.{field}", mapping.translation_table));
    }

    format!(
        "SELECT {} FROM {base} INNER JOIN {tr} ON {base}.{pk} = {tr}.{fk}",
        columns.join(", "),
        base = mapping.base_table,
        tr = mapping.translation_table,
        pk = mapping.primary_key,
        fk = mapping.foreign_key,
    )
}

/// Applies the field-copy policy: exactly the mapped columns, in mapping
/// order, with NULL standing in for values the entity did not provide.
fn copy_translated_values(
    mapping: &TranslationMapping,
    provided: &[(&'static str, Value)],
) -> Vec<(&'static str, Value)> {
    mapping
        .translated_fields
        .iter()
        .map(|field| {
            let value = provided
                .iter()
                .find(|(column, _)| column == field)
                .map_or(Value::Null, |(_, value)| value.clone());
            (*field, value)
        })
        .collect()
}

fn insert_base_row(
    conn: &Connection,
    mapping: &TranslationMapping,
    values: &[(&'static str, Value)],
) -> RepoResult<()> {
    if values.is_empty() {
        // Key-only base table: SQLite assigns the id.
        conn.execute(
            &format!("INSERT INTO {} DEFAULT VALUES;", mapping.base_table),
            [],
        )?;
        return Ok(());
    }

    let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
    let placeholders: Vec<String> = (1..=values.len()).map(|n| format!("?{n}")).collect();
    conn.execute(
        &format!(
            "INSERT INTO {} ({}) VALUES ({});",
            mapping.base_table,
            columns.join(", "),
            placeholders.join(", ")
        ),
        params_from_iter(values.iter().map(|(_, value)| value.clone())),
    )?;

    Ok(())
}

fn upsert_base_row(
    conn: &Connection,
    mapping: &TranslationMapping,
    id: RecordId,
    values: &[(&'static str, Value)],
) -> RepoResult<()> {
    if values.is_empty() {
        conn.execute(
            &format!(
                "INSERT INTO {} ({pk}) VALUES (?1) ON CONFLICT ({pk}) DO NOTHING;",
                mapping.base_table,
                pk = mapping.primary_key,
            ),
            [id],
        )?;
        return Ok(());
    }

    let mut columns = vec![mapping.primary_key];
    columns.extend(values.iter().map(|(column, _)| *column));
    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("?{n}")).collect();
    let assignments: Vec<String> = values
        .iter()
        .map(|(column, _)| format!("{column} = excluded.{column}"))
        .collect();

    let mut bind_values: Vec<Value> = vec![Value::Integer(id)];
    bind_values.extend(values.iter().map(|(_, value)| value.clone()));

    conn.execute(
        &format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {};",
            mapping.base_table,
            columns.join(", "),
            placeholders.join(", "),
            mapping.primary_key,
            assignments.join(", ")
        ),
        params_from_iter(bind_values),
    )?;

    Ok(())
}

fn update_translation_row(
    conn: &Connection,
    mapping: &TranslationMapping,
    rowid: i64,
    values: &[(&'static str, Value)],
) -> RepoResult<()> {
    if values.is_empty() {
        return Ok(());
    }

    let assignments: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
        .collect();
    let mut bind_values: Vec<Value> = values.iter().map(|(_, value)| value.clone()).collect();
    bind_values.push(Value::Integer(rowid));

    conn.execute(
        &format!(
            "UPDATE {} SET {} WHERE rowid = ?{};",
            mapping.translation_table,
            assignments.join(", "),
            values.len() + 1
        ),
        params_from_iter(bind_values),
    )?;

    Ok(())
}

fn insert_translation_row(
    conn: &Connection,
    mapping: &TranslationMapping,
    id: RecordId,
    locale: &Locale,
    values: &[(&'static str, Value)],
) -> RepoResult<()> {
    let mut columns = vec![mapping.foreign_key, "locale"];
    columns.extend(values.iter().map(|(column, _)| *column));
    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("?{n}")).collect();

    let mut bind_values: Vec<Value> = vec![
        Value::Integer(id),
        Value::Text(locale.as_str().to_string()),
    ];
    bind_values.extend(values.iter().map(|(_, value)| value.clone()));

    conn.execute(
        &format!(
            "INSERT INTO {} ({}) VALUES ({});",
            mapping.translation_table,
            columns.join(", "),
            placeholders.join(", ")
        ),
        params_from_iter(bind_values),
    )?;

    Ok(())
}

fn ensure_connection_ready(conn: &Connection, mapping: &TranslationMapping) -> RepoResult<()> {
    for table in [mapping.base_table, mapping.translation_table] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    if !table_has_column(conn, mapping.base_table, mapping.primary_key)? {
        return Err(RepoError::MissingRequiredColumn {
            table: mapping.base_table,
            column: mapping.primary_key,
        });
    }

    let mut translation_columns = vec![mapping.foreign_key, "locale"];
    translation_columns.extend_from_slice(mapping.translated_fields);
    for column in translation_columns {
        if !table_has_column(conn, mapping.translation_table, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: mapping.translation_table,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
