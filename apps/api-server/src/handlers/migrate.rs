//! Seed import endpoint.

use actix_web::{HttpResponse, web};

use quill_shared::dto::MigrationResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Seed the post collection from the configured seed file.
///
/// GET /api/migrate
pub async fn run(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let report = state.seed_importer().run().await?;

    Ok(HttpResponse::Ok().json(MigrationResponse {
        message: "Migration completed.".to_string(),
        successfully_migrated: report.inserted,
        failed_to_migrate: report.failed,
    }))
}
