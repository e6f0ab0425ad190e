use thiserror::Error;

/// 所有对外暴露的失败情形，每个变体对应一个稳定的错误码
#[derive(Debug, Error)]
pub enum ForumError {
    #[error("persona name is required")]
    NameRequired,
    #[error("persona name is reserved")]
    NameReserved,
    #[error("a persona with this name already exists")]
    NameExists,
    #[error("avatar_url is not a valid http(s) URL")]
    AvatarUrlInvalid,
    #[error("persona_name is required")]
    PersonaRequired,
    #[error("content is required")]
    ContentRequired,
    #[error("image_url is not a valid http(s) URL")]
    ImageUrlInvalid,
    #[error("no live persona with this name")]
    PersonaNotFound,
    #[error("post does not exist or was deleted")]
    PostNotFound,
    #[error("reply target is not a live comment on this post")]
    ReplyTargetInvalid,
    #[error("resource not found")]
    NotFound,
    #[error("storage failure: {0}")]
    Database(String),
}

impl ForumError {
    /// HTTP 响应体里的 `{"error": CODE}`
    pub fn code(&self) -> &'static str {
        match self {
            ForumError::NameRequired => "NAME_REQUIRED",
            ForumError::NameReserved => "NAME_RESERVED",
            ForumError::NameExists => "NAME_EXISTS",
            ForumError::AvatarUrlInvalid => "AVATAR_URL_INVALID",
            ForumError::PersonaRequired => "PERSONA_REQUIRED",
            ForumError::ContentRequired => "CONTENT_REQUIRED",
            ForumError::ImageUrlInvalid => "IMAGE_URL_INVALID",
            ForumError::PersonaNotFound => "PERSONA_NOT_FOUND",
            ForumError::PostNotFound => "POST_NOT_FOUND",
            ForumError::ReplyTargetInvalid => "REPLY_TARGET_INVALID",
            ForumError::NotFound => "NOT_FOUND",
            ForumError::Database(_) => "SERVER_ERROR",
        }
    }

    /// 存储层错误的统一包装入口，sqlx 不进入 domain 依赖
    pub fn database(e: impl std::fmt::Display) -> Self {
        ForumError::Database(e.to_string())
    }
}
