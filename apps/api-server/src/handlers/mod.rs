//! HTTP handlers and route configuration.

mod admin;
mod health;
mod migrate;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Largest accepted request body; post content can be long.
const MAX_JSON_BYTES: usize = 1024 * 1024;

/// JSON extractor settings.
///
/// Bodies are parsed regardless of content type, and a body that is not
/// valid JSON is an unexpected failure (500) rather than a 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BYTES)
        .content_type_required(false)
        .error_handler(|err, _req| AppError::Internal(format!("Malformed JSON body: {err}")).into())
}

/// Raw body limit for handlers that read the payload as bytes.
pub fn payload_config() -> web::PayloadConfig {
    web::PayloadConfig::new(MAX_JSON_BYTES)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/migrate", web::get().to(migrate::run))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{slug}", web::get().to(posts::get))
                    .route("/{slug}", web::put().to(posts::update))
                    .route("/{slug}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/admin/posts")
                    .route("/{id}", web::get().to(admin::get))
                    .route("/{id}", web::put().to(admin::update))
                    .route("/{id}", web::delete().to(admin::delete)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use quill_infra::{InMemoryPostRepository, JsonFileSeedSource, StaticSeedSource};

    use super::*;
    use crate::middleware::error::GENERIC_ERROR;
    use crate::state::AppState;

    fn payload(slug: &str, publish_date: &str) -> Value {
        json!({
            "slug": slug,
            "title": "Trading Psychology",
            "excerpt": "Stay calm",
            "content": "Discipline beats prediction.",
            "category": "psychology",
            "categoryLabel": "Psychology",
            "featuredImage": "https://cdn.example.com/calm.jpg",
            "author": "Morgan",
            "publishDate": publish_date,
            "readingTime": 6
        })
    }

    fn state_with_seed(entries: Vec<Value>) -> AppState {
        AppState::with_parts(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(StaticSeedSource::new(entries)),
        )
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(json_config())
                    .app_data(payload_config())
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! create_post {
        ($app:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json($body)
                .to_request();
            let resp: Value = test::call_and_read_body_json($app, req).await;
            resp["insertedId"].as_str().unwrap().to_string()
        }};
    }

    #[actix_web::test]
    async fn test_create_list_and_get_by_slug() {
        let app = app!(state_with_seed(vec![]));

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(payload("Calm-Mind", "2024-05-01"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        let id = body["insertedId"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let posts = body["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["id"], id.as_str());
        assert!(posts[0].get("_id").is_none());

        let req = test::TestRequest::get().uri("/api/posts/calm-mind").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["post"]["slug"], "Calm-Mind");
        assert_eq!(body["post"]["publishDate"], "2024-05-01");
        assert_eq!(body["post"]["readingTime"], 6);
    }

    #[actix_web::test]
    async fn test_create_rejects_invalid_payload_with_issues() {
        let app = app!(state_with_seed(vec![]));
        let mut body = payload("bad", "not a date");
        body["category"] = json!("crypto");
        body.as_object_mut().unwrap().remove("author");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid input");
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|issue| issue["path"][0].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["category", "author", "publishDate"]);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_generic_server_error() {
        let app = app!(state_with_seed(vec![]));
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"slug\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": GENERIC_ERROR }));
    }

    #[actix_web::test]
    async fn test_get_by_slug_decodes_the_path_once() {
        let app = app!(state_with_seed(vec![]));
        create_post!(&app, payload("a%20b", "2024-01-01"));
        create_post!(&app, payload("café-notes", "2024-01-02"));

        let req = test::TestRequest::get().uri("/api/posts/a%2520b").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["post"]["slug"], "a%20b");

        let req = test::TestRequest::get().uri("/api/posts/a%20b").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/posts/caf%C3%A9-notes")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["post"]["slug"], "café-notes");
    }

    #[actix_web::test]
    async fn test_get_unknown_slug_is_not_found() {
        let app = app!(state_with_seed(vec![]));
        let req = test::TestRequest::get().uri("/api/posts/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Post not found" }));
    }

    #[actix_web::test]
    async fn test_update_and_delete_by_slug() {
        let app = app!(state_with_seed(vec![]));
        create_post!(&app, payload("My-Post", "2024-01-01"));

        let mut update = payload("My-Post", "2024-01-01");
        update["title"] = json!("Updated");

        // Slug writes match exactly, unlike slug lookup.
        let req = test::TestRequest::put()
            .uri("/api/posts/my-post")
            .set_json(&update)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/api/posts/My-Post")
            .set_json(&update)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({ "success": true, "matchedCount": 1, "modifiedCount": 1 })
        );

        let req = test::TestRequest::delete().uri("/api/posts/My-Post").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true, "deletedCount": 1 }));

        let req = test::TestRequest::delete().uri("/api/posts/My-Post").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_admin_routes_by_id() {
        let app = app!(state_with_seed(vec![]));
        let id = create_post!(&app, payload("admin-edit", "2024-01-01"));

        let mut update = payload("admin-edit", "2024-01-01");
        update["featured"] = json!(true);
        let req = test::TestRequest::put()
            .uri(&format!("/api/admin/posts/{id}"))
            .set_json(&update)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true }));

        let req = test::TestRequest::get()
            .uri(&format!("/api/admin/posts/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["post"]["featured"], true);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/admin/posts/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true }));

        let req = test::TestRequest::delete()
            .uri(&format!("/api/admin/posts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_admin_rejects_malformed_id_before_body() {
        let app = app!(state_with_seed(vec![]));
        let req = test::TestRequest::put()
            .uri("/api/admin/posts/xyz")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Invalid post ID" }));

        let req = test::TestRequest::delete().uri("/api/admin/posts/xyz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_admin_malformed_id_wins_over_malformed_body() {
        let app = app!(state_with_seed(vec![]));
        let req = test::TestRequest::put()
            .uri("/api/admin/posts/xyz")
            .insert_header(("content-type", "application/json"))
            .set_payload("{oops")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Invalid post ID" }));

        // A well-formed id with a broken body is still an unexpected failure.
        let req = test::TestRequest::put()
            .uri("/api/admin/posts/65a1f0c2b3d4e5f601234567")
            .set_payload("{oops")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": GENERIC_ERROR }));
    }

    #[actix_web::test]
    async fn test_migrate_runs_once() {
        let mut seeded = payload("seeded", "2024-01-01");
        seeded["id"] = json!(7);
        let app = app!(state_with_seed(vec![seeded, json!({ "id": 8 })]));

        let req = test::TestRequest::get().uri("/api/migrate").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "message": "Migration completed.",
                "successfullyMigrated": 1,
                "failedToMigrate": 1
            })
        );

        let req = test::TestRequest::get().uri("/api/migrate").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("already been run"));
    }

    #[actix_web::test]
    async fn test_migrate_reports_missing_seed_file() {
        let state = AppState::with_parts(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(JsonFileSeedSource::new("/nonexistent/quill/blogs.json")),
        );
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/migrate").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = app!(state_with_seed(vec![]));
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }
}
