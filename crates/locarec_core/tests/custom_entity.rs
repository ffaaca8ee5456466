//! Accessor behavior against an entity defined outside the core crate:
//! key-only base table, two translated columns, optional values.

use locarec_core::{
    Locale, RecordId, RepoError, SqliteTranslatedRepository, StaticLocaleProvider, Translatable,
    TranslatedRepository, TranslationMapping,
};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

const BANNER_MAPPING: TranslationMapping = TranslationMapping {
    base_table: "banner",
    primary_key: "id",
    translation_table: "banner_lang",
    foreign_key: "banner_id",
    translated_fields: &["caption", "alt_text"],
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Banner {
    id: Option<RecordId>,
    caption: String,
    alt_text: Option<String>,
}

impl Translatable for Banner {
    fn mapping() -> &'static TranslationMapping {
        &BANNER_MAPPING
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn base_values(&self) -> Vec<(&'static str, Value)> {
        Vec::new()
    }

    fn translated_values(&self) -> Vec<(&'static str, Value)> {
        let mut values = vec![("caption", Value::Text(self.caption.clone()))];
        if let Some(alt_text) = &self.alt_text {
            values.push(("alt_text", Value::Text(alt_text.clone())));
        }
        values
    }

    fn from_merged_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: Some(row.get("id")?),
            caption: row.get("caption")?,
            alt_text: row.get("alt_text")?,
        })
    }
}

fn banner_schema(conn: &Connection) {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         CREATE TABLE banner (
             id INTEGER PRIMARY KEY AUTOINCREMENT
         );
         CREATE TABLE banner_lang (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             banner_id INTEGER NOT NULL REFERENCES banner (id) ON DELETE CASCADE,
             locale TEXT NOT NULL,
             caption TEXT,
             alt_text TEXT,
             UNIQUE (banner_id, locale)
         );",
    )
    .unwrap();
}

fn locale(tag: &str) -> Locale {
    Locale::new(tag).unwrap()
}

#[test]
fn key_only_base_insert_assigns_id() {
    let mut conn = Connection::open_in_memory().unwrap();
    banner_schema(&conn);
    let mut repo = SqliteTranslatedRepository::<Banner, _>::with_provider(
        &mut conn,
        StaticLocaleProvider(locale("en")),
    )
    .unwrap();

    let mut banner = Banner {
        id: None,
        caption: "Welcome".to_string(),
        alt_text: Some("welcome banner".to_string()),
    };
    let id = repo.save(&mut banner).unwrap();
    assert_eq!(banner.id, Some(id));

    let fetched: Banner = repo.fetch_one(id).unwrap().unwrap();
    assert_eq!(fetched, banner);
}

#[test]
fn unprovided_translated_column_persists_as_null() {
    let mut conn = Connection::open_in_memory().unwrap();
    banner_schema(&conn);
    let mut repo = SqliteTranslatedRepository::<Banner, _>::with_provider(
        &mut conn,
        StaticLocaleProvider(locale("en")),
    )
    .unwrap();

    let mut banner = Banner {
        id: None,
        caption: "No alt".to_string(),
        alt_text: None,
    };
    let id = repo.save(&mut banner).unwrap();

    let fetched: Banner = repo.fetch_one(id).unwrap().unwrap();
    assert_eq!(fetched.caption, "No alt");
    assert_eq!(fetched.alt_text, None);
}

#[test]
fn second_save_overwrites_both_translated_columns() {
    let mut conn = Connection::open_in_memory().unwrap();
    banner_schema(&conn);
    let id = {
        let mut repo = SqliteTranslatedRepository::<Banner, _>::with_provider(
            &mut conn,
            StaticLocaleProvider(locale("en")),
        )
        .unwrap();

        let mut banner = Banner {
            id: None,
            caption: "v1".to_string(),
            alt_text: Some("first".to_string()),
        };
        let id = repo.save(&mut banner).unwrap();

        banner.caption = "v2".to_string();
        banner.alt_text = None;
        repo.save(&mut banner).unwrap();

        let fetched: Banner = repo.fetch_one(id).unwrap().unwrap();
        assert_eq!(fetched.caption, "v2");
        assert_eq!(fetched.alt_text, None);
        id
    };

    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM banner_lang WHERE banner_id = ?1;",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn readiness_check_reports_missing_translated_column() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE banner (id INTEGER PRIMARY KEY AUTOINCREMENT);
         CREATE TABLE banner_lang (
             banner_id INTEGER NOT NULL,
             locale TEXT NOT NULL,
             caption TEXT
         );",
    )
    .unwrap();

    let result = SqliteTranslatedRepository::<Banner>::try_new(&mut conn);
    assert!(matches!(
        result.err(),
        Some(RepoError::MissingRequiredColumn {
            table: "banner_lang",
            column: "alt_text",
        })
    ));
}
