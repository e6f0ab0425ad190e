use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::state::AppState;
use domain::Persona;

#[derive(Deserialize)]
pub struct CreatePersonaRequest {
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub creator: Option<String>,
}

pub async fn list_personas(
    State(state): State<AppState>,
) -> Result<Json<Vec<Persona>>, ApiError> {
    let personas = state.db.list_personas().await?;
    Ok(Json(personas))
}

pub async fn create_persona(
    State(state): State<AppState>,
    Json(payload): Json<CreatePersonaRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = state
        .db
        .create_persona(
            &payload.name,
            payload.avatar_url.as_deref(),
            payload.bio.as_deref(),
            payload.creator.as_deref(),
        )
        .await?;
    Ok(Json(json!({ "ok": true, "id": id })))
}

pub async fn delete_persona(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.db.soft_delete_persona(id).await?;
    Ok(Json(json!({ "ok": true })))
}
