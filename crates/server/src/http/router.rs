use super::handlers::{comments, personas, posts};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins: {:?}", origins);
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_origin(origins)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route(
            "/api/personas",
            get(personas::list_personas).post(personas::create_persona),
        )
        .route("/api/personas/:id", delete(personas::delete_persona))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/api/posts/:id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/api/comments", post(comments::create_comment))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use storage::Db;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Db::new("sqlite::memory:").await.expect("in-memory db");
        build_router(AppState { db }, "*")
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(b) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn persona_endpoints() {
        let app = test_app().await;

        let (status, body) =
            send(&app, "POST", "/api/personas", Some(json!({ "name": "Alice" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        let id = body["id"].as_i64().expect("numeric id");

        // 大小写不敏感的重名冲突
        let (status, body) =
            send(&app, "POST", "/api/personas", Some(json!({ "name": "alice" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], json!("NAME_EXISTS"));

        let (status, body) =
            send(&app, "POST", "/api/personas", Some(json!({ "name": "未命名" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("NAME_RESERVED"));

        let (status, body) = send(&app, "GET", "/api/personas", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        // 删除幂等
        let uri = format!("/api/personas/{}", id);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "DELETE", "/api/personas/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("NOT_FOUND"));
    }

    #[tokio::test]
    async fn post_survives_author_deletion_with_placeholder() {
        let app = test_app().await;

        let (_, body) = send(
            &app,
            "POST",
            "/api/personas",
            Some(json!({ "name": "Alice", "avatar_url": "https://x.org/a.png" })),
        )
        .await;
        let persona_id = body["id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            "/api/posts",
            Some(json!({ "persona_name": "Alice", "content": "hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].is_i64());

        let (_, body) = send(&app, "GET", "/api/posts", None).await;
        let posts = body.as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["persona_name"], json!("Alice"));
        assert_eq!(posts[0]["reply_count"], json!(0));

        send(&app, "DELETE", &format!("/api/personas/{}", persona_id), None).await;

        let (_, body) = send(&app, "GET", "/api/posts", None).await;
        let posts = body.as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["persona_name"], json!("deleted persona"));
        assert_eq!(posts[0]["persona_avatar_url"], Value::Null);
        assert_eq!(posts[0]["persona_deleted"], json!(true));
        assert_eq!(posts[0]["reply_count"], json!(0));
    }

    #[tokio::test]
    async fn comment_replies_and_cascade_delete() {
        let app = test_app().await;

        send(&app, "POST", "/api/personas", Some(json!({ "name": "B" }))).await;
        let (_, body) = send(
            &app,
            "POST",
            "/api/posts",
            Some(json!({ "persona_name": "B", "content": "first" })),
        )
        .await;
        let p1 = body["id"].as_i64().unwrap();
        let (_, body) = send(
            &app,
            "POST",
            "/api/posts",
            Some(json!({ "persona_name": "B", "content": "second" })),
        )
        .await;
        let p2 = body["id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            "/api/comments",
            Some(json!({ "post_id": p1, "persona_name": "B", "content": "c1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let c1 = body["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "POST",
            "/api/comments",
            Some(json!({
                "post_id": p1, "persona_name": "B",
                "content": "c2", "reply_to_comment_id": c1
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // 跨帖回复
        let (status, body) = send(
            &app,
            "POST",
            "/api/comments",
            Some(json!({
                "post_id": p2, "persona_name": "B",
                "content": "x", "reply_to_comment_id": c1
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("REPLY_TARGET_INVALID"));

        let (status, body) = send(&app, "GET", &format!("/api/posts/{}", p1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["post"]["reply_count"], json!(2));
        assert_eq!(body["comments"].as_array().unwrap().len(), 2);

        let (status, _) = send(&app, "DELETE", &format!("/api/posts/{}", p1), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", &format!("/api/posts/{}", p1), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("NOT_FOUND"));

        let (_, body) = send(&app, "GET", "/api/posts?sort=hot", None).await;
        let posts = body.as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["id"].as_i64(), Some(p2));
    }

    #[tokio::test]
    async fn create_post_error_codes() {
        let app = test_app().await;
        send(&app, "POST", "/api/personas", Some(json!({ "name": "B" }))).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/posts",
            Some(json!({ "persona_name": "Ghost", "content": "hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("PERSONA_NOT_FOUND"));

        let (status, body) = send(
            &app,
            "POST",
            "/api/posts",
            Some(json!({ "persona_name": "B", "content": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("CONTENT_REQUIRED"));

        let (status, body) = send(
            &app,
            "POST",
            "/api/posts",
            Some(json!({ "persona_name": "B", "content": "hi", "image_url": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("IMAGE_URL_INVALID"));
    }
}
