//! Post use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for post CRUD under the active locale.
//! - Delegate persistence to translated repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::locale::Locale;
use crate::model::post::Post;
use crate::model::translatable::RecordId;
use crate::repo::translated_repo::{RepoError, RepoResult, TranslatedRepository};

/// Use-case service wrapper for locale-aware post operations.
pub struct PostService<R: TranslatedRepository<Post>> {
    repo: R,
}

impl<R: TranslatedRepository<Post>> PostService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a post under the active locale and returns it with its
    /// assigned id.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> RepoResult<Post> {
        let mut post = Post::new(title, body);
        self.repo.save(&mut post)?;
        Ok(post)
    }

    /// Writes a translation of an existing post for another locale.
    ///
    /// Fetches the merged record under the current locale, switches the
    /// repository to `locale`, then saves with the new body.
    ///
    /// # Errors
    /// Returns `NotFound` when the post has no row under the current
    /// locale to start from.
    pub fn localize(
        &mut self,
        id: RecordId,
        locale: Locale,
        body: impl Into<String>,
    ) -> RepoResult<Post> {
        let Some(mut post) = self.repo.fetch_one(id)? else {
            return Err(RepoError::NotFound(id));
        };

        post.body = body.into();
        self.repo.set_locale(locale);
        self.repo.save(&mut post)?;
        Ok(post)
    }

    /// Gets one post by id under the active locale.
    pub fn get(&self, id: RecordId) -> RepoResult<Option<Post>> {
        self.repo.fetch_one(id)
    }

    /// Lists all posts translated into the active locale.
    pub fn list(&self) -> RepoResult<Vec<Post>> {
        self.repo.fetch_all()
    }

    /// Saves base fields and the active-locale translation of a post.
    pub fn update(&mut self, post: &mut Post) -> RepoResult<RecordId> {
        self.repo.save(post)
    }

    /// Deletes a post; translations are removed by cascade.
    pub fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        self.repo.delete(id)
    }

    /// Overrides the locale for subsequent calls on this service.
    pub fn set_locale(&mut self, locale: Locale) {
        self.repo.set_locale(locale);
    }

    /// Returns the locale currently applied by this service.
    pub fn locale(&self) -> Locale {
        self.repo.locale()
    }
}
