//! Core domain logic for locale-aware record storage.
//! This crate is the single source of truth for translation invariants.

pub mod db;
pub mod locale;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use locale::{
    process_locale, set_process_locale, Locale, LocaleError, LocaleProvider,
    ProcessLocaleProvider, StaticLocaleProvider,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::post::Post;
pub use model::translatable::{RecordId, Translatable, TranslationMapping, ValidationError};
pub use repo::translated_repo::{
    RepoError, RepoResult, SqliteTranslatedRepository, TranslatedRepository,
};
pub use service::post_service::PostService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
