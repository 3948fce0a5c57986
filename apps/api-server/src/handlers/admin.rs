//! Admin post handlers, addressed by store identifier.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use quill_core::domain::PostId;
use quill_shared::SuccessResponse;
use quill_shared::dto::PostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(&path).await?;
    Ok(HttpResponse::Ok().json(PostResponse { post }))
}

/// PUT /api/admin/posts/{id}
///
/// The body is taken as bytes so a malformed id is reported before the
/// payload is parsed.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Internal(format!("Malformed JSON body: {e}")))?;

    state.posts.update_by_id(id.as_str(), &body).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete_by_id(&path).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
