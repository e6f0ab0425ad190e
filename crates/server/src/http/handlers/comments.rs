use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: i64,
    pub persona_name: String,
    pub content: String,
    pub reply_to_comment_id: Option<i64>,
}

pub async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = state
        .db
        .create_comment(
            payload.post_id,
            &payload.persona_name,
            &payload.content,
            payload.reply_to_comment_id,
        )
        .await?;
    Ok(Json(json!({ "ok": true, "id": id })))
}
