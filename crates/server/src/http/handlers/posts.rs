use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::state::AppState;
use domain::{PostDetail, PostView, SortOrder};

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub persona_name: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub sort: SortOrder,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    let posts = state.db.list_posts(query.sort).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostDetail>, ApiError> {
    let detail = state.db.get_post_with_comments(id).await?;
    Ok(Json(detail))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = state
        .db
        .create_post(
            &payload.persona_name,
            &payload.content,
            payload.image_url.as_deref(),
        )
        .await?;
    Ok(Json(json!({ "ok": true, "id": id })))
}

/// 删除帖子并级联其所有评论
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.db.soft_delete_post(id).await?;
    Ok(Json(json!({ "ok": true })))
}
