use locarec_core::db::open_db_in_memory;
use locarec_core::{
    Locale, Post, PostService, RepoError, SqliteTranslatedRepository, StaticLocaleProvider,
};

fn locale(tag: &str) -> Locale {
    Locale::new(tag).unwrap()
}

#[test]
fn create_then_localize_serves_both_locales() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTranslatedRepository::<Post, _>::with_provider(
        &mut conn,
        StaticLocaleProvider(locale("en")),
    )
    .unwrap();
    let mut service = PostService::new(repo);

    let post = service.create("Title", "English body").unwrap();
    let id = post.id.unwrap();

    service.localize(id, locale("fr"), "Corps").unwrap();

    // localize leaves the service on the target locale.
    assert_eq!(service.locale().as_str(), "fr");
    let french = service.get(id).unwrap().unwrap();
    assert_eq!(french.title, "Title");
    assert_eq!(french.body, "Corps");

    service.set_locale(locale("en"));
    let english = service.get(id).unwrap().unwrap();
    assert_eq!(english.body, "English body");
}

#[test]
fn localize_missing_post_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTranslatedRepository::<Post, _>::with_provider(
        &mut conn,
        StaticLocaleProvider(locale("en")),
    )
    .unwrap();
    let mut service = PostService::new(repo);

    let err = service.localize(99, locale("fr"), "x").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn list_update_and_delete_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTranslatedRepository::<Post, _>::with_provider(
        &mut conn,
        StaticLocaleProvider(locale("en")),
    )
    .unwrap();
    let mut service = PostService::new(repo);

    let mut first = service.create("one", "body one").unwrap();
    let second = service.create("two", "body two").unwrap();

    first.title = "one updated".to_string();
    service.update(&mut first).unwrap();

    let listed = service.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "one updated");

    service.delete(second.id.unwrap()).unwrap();
    assert_eq!(service.list().unwrap().len(), 1);
}
