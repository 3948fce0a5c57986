//! MongoDB repository implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{self, Document, doc, oid::ObjectId},
    error::{Error as MongoError, ErrorKind},
    options::FindOptions,
};

use quill_core::domain::{BlogPost, PostId, PostRecord, SlugMatch, UpdateOutcome};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

/// Post repository backed by a MongoDB collection.
///
/// Records are stored as plain documents: the schema fields in camelCase plus
/// the driver-assigned `_id`.
#[derive(Clone)]
pub struct MongoPostRepository {
    collection: Collection<Document>,
}

impl MongoPostRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

fn map_mongo_err(e: MongoError) -> RepoError {
    match *e.kind {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => RepoError::Connection(e.to_string()),
        ErrorKind::Write(_) => RepoError::Rejected(e.to_string()),
        _ => RepoError::Query(e.to_string()),
    }
}

fn object_id(id: &PostId) -> Result<ObjectId, RepoError> {
    ObjectId::parse_str(id.as_str()).map_err(|e| RepoError::Query(e.to_string()))
}

/// Filter matching a slug. The case-insensitive form is an anchored,
/// escaped regex so the slug can never act as a pattern.
pub(crate) fn slug_filter(slug: &str, matching: SlugMatch) -> Document {
    match matching {
        SlugMatch::Exact => doc! { "slug": slug },
        SlugMatch::CaseInsensitive => doc! {
            "slug": {
                "$regex": format!("^{}$", regex::escape(slug)),
                "$options": "i",
            }
        },
    }
}

/// `$set` update carrying every field present on `post`.
pub(crate) fn set_update(post: &BlogPost) -> Result<Document, RepoError> {
    let fields = bson::to_document(post).map_err(|e| RepoError::Rejected(e.to_string()))?;
    Ok(doc! { "$set": fields })
}

/// Map a stored document to a record: `_id` becomes the hex `id`, and
/// fields outside the schema are kept.
pub(crate) fn to_record(mut document: Document) -> Result<PostRecord, RepoError> {
    let oid = document
        .get_object_id("_id")
        .map_err(|e| RepoError::Corrupt(e.to_string()))?;
    document.remove("_id");
    document.insert("id", oid.to_hex());

    bson::from_document(document).map_err(|e| RepoError::Corrupt(e.to_string()))
}

/// Records for a listing. A document that no longer fits the schema is
/// logged and left out instead of failing the whole list.
pub(crate) fn collect_records(documents: Vec<Document>) -> Vec<PostRecord> {
    documents
        .into_iter()
        .filter_map(|document| match to_record(document) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed post record");
                None
            }
        })
        .collect()
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, post: BlogPost) -> Result<PostId, RepoError> {
        let document = bson::to_document(&post).map_err(|e| RepoError::Rejected(e.to_string()))?;
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(map_mongo_err)?;

        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| RepoError::Corrupt("inserted id is not an ObjectId".to_string()))?;
        PostId::parse(&oid.to_hex()).map_err(|e| RepoError::Corrupt(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<PostRecord>, RepoError> {
        let options = FindOptions::builder()
            .sort(doc! { "publishDate": -1 })
            .build();

        let documents: Vec<Document> = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(map_mongo_err)?
            .try_collect()
            .await
            .map_err(map_mongo_err)?;

        Ok(collect_records(documents))
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<PostRecord>, RepoError> {
        let document = self
            .collection
            .find_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(map_mongo_err)?;

        document.map(to_record).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let document = self
            .collection
            .find_one(slug_filter(slug, SlugMatch::CaseInsensitive))
            .await
            .map_err(map_mongo_err)?;

        document.map(to_record).transpose()
    }

    async fn update_by_id(
        &self,
        id: &PostId,
        post: BlogPost,
    ) -> Result<UpdateOutcome, RepoError> {
        let result = self
            .collection
            .update_one(doc! { "_id": object_id(id)? }, set_update(&post)?)
            .await
            .map_err(map_mongo_err)?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn update_by_slug(
        &self,
        slug: &str,
        matching: SlugMatch,
        post: BlogPost,
    ) -> Result<UpdateOutcome, RepoError> {
        let result = self
            .collection
            .update_one(slug_filter(slug, matching), set_update(&post)?)
            .await
            .map_err(map_mongo_err)?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: &PostId) -> Result<u64, RepoError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(map_mongo_err)?;

        Ok(result.deleted_count)
    }

    async fn delete_by_slug(&self, slug: &str, matching: SlugMatch) -> Result<u64, RepoError> {
        let result = self
            .collection
            .delete_one(slug_filter(slug, matching))
            .await
            .map_err(map_mongo_err)?;

        Ok(result.deleted_count)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(map_mongo_err)
    }
}
