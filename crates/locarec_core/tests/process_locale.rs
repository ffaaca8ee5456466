//! Process-wide locale default behavior.
//!
//! Kept in its own test binary: these tests mutate the process-wide locale
//! and must not interleave with suites that assume the default.

use locarec_core::db::open_db_in_memory;
use locarec_core::{
    process_locale, set_process_locale, Locale, Post, SqliteTranslatedRepository,
    TranslatedRepository,
};

#[test]
fn repository_follows_process_locale_until_overridden() {
    assert_eq!(process_locale().as_str(), "en");
    set_process_locale(Locale::new("de").unwrap());

    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteTranslatedRepository::<Post>::try_new(&mut conn).unwrap();
    assert_eq!(repo.locale().as_str(), "de");

    let mut post = Post::new("Titel", "Deutscher Text");
    let id = repo.save(&mut post).unwrap();
    assert_eq!(repo.fetch_one(id).unwrap().unwrap().body, "Deutscher Text");

    // Instance override wins over the process setting.
    repo.set_locale(Locale::new("fr").unwrap());
    assert_eq!(repo.locale().as_str(), "fr");
    assert!(repo.fetch_one(id).unwrap().is_none());

    // Later process changes do not affect the overridden instance.
    set_process_locale(Locale::new("it").unwrap());
    assert_eq!(repo.locale().as_str(), "fr");
}
