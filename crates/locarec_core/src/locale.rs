//! Locale tags and the current-locale source.
//!
//! # Responsibility
//! - Define the validated `Locale` tag used by all translation lookups.
//! - Provide pluggable sources for the "current" locale.
//!
//! # Invariants
//! - A `Locale` is never empty and is always stored lowercase.
//! - The process-wide locale always holds a valid tag (default `en`).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{PoisonError, RwLock};

/// Locale used when the process-wide setting was never touched.
pub const DEFAULT_LOCALE: &str = "en";

static PROCESS_LOCALE: Lazy<RwLock<Locale>> =
    Lazy::new(|| RwLock::new(Locale(DEFAULT_LOCALE.to_string())));

/// Language/region tag selecting which translation row applies.
///
/// Tags are normalized on construction: surrounding whitespace is dropped
/// and letters are lowercased, so `" FR "` and `"fr"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

/// Rejection reason for a malformed locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    Empty,
    InvalidCharacter { tag: String, character: char },
}

impl Display for LocaleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "locale tag cannot be empty"),
            Self::InvalidCharacter { tag, character } => {
                write!(f, "locale tag `{tag}` contains invalid character `{character}`")
            }
        }
    }
}

impl Error for LocaleError {}

impl Locale {
    /// Parses and normalizes a locale tag.
    ///
    /// # Errors
    /// - `LocaleError::Empty` when the trimmed tag is empty.
    /// - `LocaleError::InvalidCharacter` for anything outside
    ///   ASCII alphanumerics, `-` and `_`.
    pub fn new(tag: impl AsRef<str>) -> Result<Self, LocaleError> {
        let normalized = tag.as_ref().trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(LocaleError::Empty);
        }
        if let Some(character) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(LocaleError::InvalidCharacter {
                tag: normalized,
                character,
            });
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

/// Source of the active locale for accessors that were not overridden.
pub trait LocaleProvider {
    /// Returns the locale that should apply to the next operation.
    fn current_locale(&self) -> Locale;
}

/// Provider backed by the process-wide current-locale setting.
///
/// Mirrors a request/session language service: one mutable setting shared by
/// every accessor that did not receive an explicit override.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLocaleProvider;

impl LocaleProvider for ProcessLocaleProvider {
    fn current_locale(&self) -> Locale {
        process_locale()
    }
}

/// Provider pinned to one fixed locale.
///
/// Useful for services and tests that must not depend on process state.
#[derive(Debug, Clone)]
pub struct StaticLocaleProvider(pub Locale);

impl LocaleProvider for StaticLocaleProvider {
    fn current_locale(&self) -> Locale {
        self.0.clone()
    }
}

/// Returns the process-wide current locale.
pub fn process_locale() -> Locale {
    PROCESS_LOCALE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide current locale.
pub fn set_process_locale(locale: Locale) {
    *PROCESS_LOCALE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = locale;
}
