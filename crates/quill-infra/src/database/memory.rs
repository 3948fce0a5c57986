//! In-memory post repository - used when no database is configured, and in
//! tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{BlogPost, PostId, PostRecord, SlugMatch, UpdateOutcome};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

/// In-memory post collection with the same observable semantics as the
/// MongoDB repository: store-assigned hex identifiers, `publishDate`
/// descending order, and `$set`-style updates that leave an existing
/// `featured` flag alone when the payload omits it.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Vec<PostRecord>>,
    sequence: AtomicU64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// ObjectId-shaped identifier: seconds since epoch followed by a counter.
    fn next_id(&self) -> Result<PostId, RepoError> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let secs = chrono::Utc::now().timestamp() as u32;
        PostId::parse(&format!("{secs:08x}{seq:016x}")).map_err(|e| RepoError::Query(e.to_string()))
    }

    fn apply(existing: &mut BlogPost, mut update: BlogPost) -> u64 {
        if update.featured.is_none() {
            update.featured = existing.featured;
        }
        if *existing == update {
            return 0;
        }
        *existing = update;
        1
    }

    async fn update_where<F>(&self, matches: F, post: BlogPost) -> UpdateOutcome
    where
        F: Fn(&PostRecord) -> bool,
    {
        let mut store = self.store.write().await;
        match store.iter_mut().find(|r| matches(&**r)) {
            Some(record) => UpdateOutcome {
                matched: 1,
                modified: Self::apply(&mut record.post, post),
            },
            None => UpdateOutcome::default(),
        }
    }

    async fn delete_where<F>(&self, matches: F) -> u64
    where
        F: Fn(&PostRecord) -> bool,
    {
        let mut store = self.store.write().await;
        match store.iter().position(|r| matches(r)) {
            Some(index) => {
                store.remove(index);
                1
            }
            None => 0,
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: BlogPost) -> Result<PostId, RepoError> {
        let id = self.next_id()?;
        let mut store = self.store.write().await;
        store.push(PostRecord::new(id.clone(), post));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<PostRecord>, RepoError> {
        let store = self.store.read().await;
        let mut records = store.clone();
        records.sort_by(|a, b| b.post.publish_date.cmp(&a.post.publish_date));
        Ok(records)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<PostRecord>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|r| &r.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .find(|r| SlugMatch::CaseInsensitive.matches(slug, &r.post.slug))
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: &PostId,
        post: BlogPost,
    ) -> Result<UpdateOutcome, RepoError> {
        Ok(self.update_where(|r| &r.id == id, post).await)
    }

    async fn update_by_slug(
        &self,
        slug: &str,
        matching: SlugMatch,
        post: BlogPost,
    ) -> Result<UpdateOutcome, RepoError> {
        Ok(self
            .update_where(|r| matching.matches(slug, &r.post.slug), post)
            .await)
    }

    async fn delete_by_id(&self, id: &PostId) -> Result<u64, RepoError> {
        Ok(self.delete_where(|r| &r.id == id).await)
    }

    async fn delete_by_slug(&self, slug: &str, matching: SlugMatch) -> Result<u64, RepoError> {
        Ok(self
            .delete_where(|r| matching.matches(slug, &r.post.slug))
            .await)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }
}
