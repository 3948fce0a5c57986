//! Public post handlers, addressed by slug.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::Value;

use quill_shared::dto::{
    CreatedResponse, PostListResponse, PostResponse, SlugDeleteResponse, SlugUpdateResponse,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(PostListResponse { posts }))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let id = state.posts.create(&body).await?;

    Ok(HttpResponse::Created().json(CreatedResponse {
        success: true,
        inserted_id: id.into_inner(),
    }))
}

/// GET /api/posts/{slug}
///
/// Reads the raw segment: the service percent-decodes it exactly once.
pub async fn get(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_slug(req.match_info().query("slug")).await?;
    Ok(HttpResponse::Ok().json(PostResponse { post }))
}

/// PUT /api/posts/{slug}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let outcome = state.posts.update_by_slug(&path, &body).await?;

    Ok(HttpResponse::Ok().json(SlugUpdateResponse {
        success: true,
        matched_count: outcome.matched,
        modified_count: outcome.modified,
    }))
}

/// DELETE /api/posts/{slug}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let deleted_count = state.posts.delete_by_slug(&path).await?;

    Ok(HttpResponse::Ok().json(SlugDeleteResponse {
        success: true,
        deleted_count,
    }))
}
