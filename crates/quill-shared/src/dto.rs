//! Data Transfer Objects - response bodies for the post API.

use serde::{Deserialize, Serialize};

/// `GET /posts` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse<T> {
    pub posts: Vec<T>,
}

/// Single post body, used by the get-by-slug and get-by-id routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse<T> {
    pub post: T,
}

/// Response to a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    pub inserted_id: String,
}

/// Response to an update addressed by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugUpdateResponse {
    pub success: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Response to a delete addressed by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugDeleteResponse {
    pub success: bool,
    pub deleted_count: u64,
}

/// Outcome of a seed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResponse {
    pub message: String,
    pub successfully_migrated: u64,
    pub failed_to_migrate: u64,
}
