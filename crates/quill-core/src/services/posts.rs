//! Post operations over a [`PostRepository`].
//!
//! Identifier format checks happen here, before the store is touched, and
//! zero-count store results become [`DomainError::NotFound`].

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::domain::{BlogPost, PostId, PostRecord, SlugMatch, UpdateOutcome};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Post service holding an explicit repository handle.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    slug_writes: SlugMatch,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            repo,
            slug_writes: SlugMatch::default(),
        }
    }

    /// Slug comparison used by update/delete by slug. Lookup by slug is
    /// always case-insensitive regardless of this setting.
    pub fn with_slug_writes(mut self, matching: SlugMatch) -> Self {
        self.slug_writes = matching;
        self
    }

    pub fn slug_writes(&self) -> SlugMatch {
        self.slug_writes
    }

    pub fn repository(&self) -> &Arc<dyn PostRepository> {
        &self.repo
    }

    pub async fn list(&self) -> Result<Vec<PostRecord>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<PostRecord, DomainError> {
        let id = PostId::parse(raw_id)?;
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn get_by_slug(&self, raw_slug: &str) -> Result<PostRecord, DomainError> {
        let slug = decode_slug(raw_slug);
        tracing::debug!(slug = %slug, "Finding post by slug");
        self.repo
            .find_by_slug(&slug)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Validate `body` and insert it as a new post.
    pub async fn create(&self, body: &Value) -> Result<PostId, DomainError> {
        let post = BlogPost::validate(body)?;
        let id = self.repo.insert(post).await?;
        tracing::info!(post_id = %id, "Post created");
        Ok(id)
    }

    pub async fn update_by_id(&self, raw_id: &str, body: &Value) -> Result<(), DomainError> {
        let id = PostId::parse(raw_id)?;
        let post = BlogPost::validate(body)?;
        let outcome = self.repo.update_by_id(&id, post).await?;
        if outcome.matched == 0 {
            return Err(DomainError::NotFound);
        }
        tracing::info!(post_id = %id, modified = outcome.modified, "Post updated");
        Ok(())
    }

    /// The slug is used verbatim, without decoding or format checks.
    pub async fn update_by_slug(
        &self,
        slug: &str,
        body: &Value,
    ) -> Result<UpdateOutcome, DomainError> {
        let post = BlogPost::validate(body)?;
        let outcome = self
            .repo
            .update_by_slug(slug, self.slug_writes, post)
            .await?;
        if outcome.matched == 0 {
            return Err(DomainError::NotFound);
        }
        tracing::info!(slug = %slug, modified = outcome.modified, "Post updated");
        Ok(outcome)
    }

    pub async fn delete_by_id(&self, raw_id: &str) -> Result<(), DomainError> {
        let id = PostId::parse(raw_id)?;
        if self.repo.delete_by_id(&id).await? == 0 {
            return Err(DomainError::NotFound);
        }
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    pub async fn delete_by_slug(&self, slug: &str) -> Result<u64, DomainError> {
        let deleted = self.repo.delete_by_slug(slug, self.slug_writes).await?;
        if deleted == 0 {
            return Err(DomainError::NotFound);
        }
        tracing::info!(slug = %slug, "Post deleted");
        Ok(deleted)
    }
}

/// Percent-decode a slug taken from a URL. Invalid UTF-8 sequences are
/// replaced rather than rejected.
pub fn decode_slug(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
