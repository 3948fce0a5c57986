use async_trait::async_trait;

use crate::domain::{BlogPost, PostId, PostRecord, SlugMatch, UpdateOutcome};
use crate::error::RepoError;

/// Post repository - a single logical collection of post records.
///
/// Implementations report raw store outcomes (counts, `Option`s); turning a
/// zero count into "not found" is the caller's job.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new record and return the store-assigned identifier.
    async fn insert(&self, post: BlogPost) -> Result<PostId, RepoError>;

    /// All records, ordered by `publishDate` descending (string order).
    async fn find_all(&self) -> Result<Vec<PostRecord>, RepoError>;

    /// Find a record by its identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<PostRecord>, RepoError>;

    /// Find the first record whose slug equals `slug`, ignoring case.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError>;

    /// Set every field of `post` on the record with this identifier.
    async fn update_by_id(&self, id: &PostId, post: BlogPost)
    -> Result<UpdateOutcome, RepoError>;

    /// Set every field of `post` on the first record matching `slug`.
    async fn update_by_slug(
        &self,
        slug: &str,
        matching: SlugMatch,
        post: BlogPost,
    ) -> Result<UpdateOutcome, RepoError>;

    /// Delete the record with this identifier; returns the deleted count.
    async fn delete_by_id(&self, id: &PostId) -> Result<u64, RepoError>;

    /// Delete the first record matching `slug`; returns the deleted count.
    async fn delete_by_slug(&self, slug: &str, matching: SlugMatch) -> Result<u64, RepoError>;

    /// Number of records in the collection.
    async fn count(&self) -> Result<u64, RepoError>;
}
