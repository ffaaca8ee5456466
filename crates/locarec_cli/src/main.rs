//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the full translated-record flow against a throwaway database.
//! - Keep output deterministic for quick local sanity checks.

use locarec_core::db::open_db_in_memory;
use locarec_core::{
    Locale, Post, PostService, SqliteTranslatedRepository, StaticLocaleProvider,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("locarec_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("locarec_core version={}", locarec_core::core_version());

    let english = Locale::new("en")?;
    let french = Locale::new("fr")?;

    let mut conn = open_db_in_memory()?;
    let repo = SqliteTranslatedRepository::<Post, _>::with_provider(
        &mut conn,
        StaticLocaleProvider(english.clone()),
    )?;
    let mut service = PostService::new(repo);

    let post = service.create("Hello", "English body")?;
    let id = post.id.ok_or("saved post should carry an id")?;
    println!("saved post id={id} locale={english}");

    service.localize(id, french.clone(), "Corps en français")?;

    service.set_locale(english);
    match service.get(id)? {
        Some(record) => println!("en -> title={} body={}", record.title, record.body),
        None => println!("en -> absent"),
    }

    service.set_locale(french);
    match service.get(id)? {
        Some(record) => println!("fr -> title={} body={}", record.title, record.body),
        None => println!("fr -> absent"),
    }

    Ok(())
}
