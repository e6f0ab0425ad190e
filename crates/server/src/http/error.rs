use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::ForumError;

/// 把 ForumError 映射为 `{"error": CODE}` + 对应状态码
pub struct ApiError(pub ForumError);

impl From<ForumError> for ApiError {
    fn from(e: ForumError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ForumError::NotFound => StatusCode::NOT_FOUND,
            ForumError::NameExists => StatusCode::CONFLICT,
            ForumError::Database(msg) => {
                // 细节只进日志，不进响应体
                tracing::error!("storage failure: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.0.code() }))).into_response()
    }
}
