use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 软删除后的占位作者名，读取侧统一回退到这个常量
pub const DELETED_PERSONA_NAME: &str = "deleted persona";

/// 保留名，禁止注册
pub const RESERVED_PERSONA_NAME: &str = "未命名";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub creator: Option<String>,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Persona {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// 列表/详情用的 Post 视图：已拼接作者展示字段和回复数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: i64,
    pub persona_id: i64,
    pub persona_name: String,
    pub persona_avatar_url: Option<String>,
    pub persona_deleted: bool,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub reply_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub persona_id: i64,
    pub persona_name: String,
    pub persona_avatar_url: Option<String>,
    pub persona_deleted: bool,
    pub content: String,
    pub reply_to_comment_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

/// 帖子列表排序方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// created_at 倒序
    #[default]
    New,
    /// 按存活评论数倒序，平局时新帖在前
    Hot,
}
