use chrono::NaiveDateTime;
use domain::{CommentView, Persona, PostView, DELETED_PERSONA_NAME};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlPersona {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub creator: Option<String>,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl From<SqlPersona> for Persona {
    fn from(sql: SqlPersona) -> Self {
        Persona {
            id: sql.id,
            name: sql.name,
            avatar_url: sql.avatar_url,
            bio: sql.bio,
            creator: sql.creator,
            created_at: sql.created_at,
            deleted_at: sql.deleted_at,
        }
    }
}

// Join 出来的作者展示字段。LEFT JOIN 下 persona 可能整行缺失，
// 与软删除一样回退到占位名。
fn mask_persona(
    name: Option<String>,
    avatar_url: Option<String>,
    deleted_at: Option<NaiveDateTime>,
) -> (String, Option<String>, bool) {
    match name {
        Some(n) if deleted_at.is_none() => (n, avatar_url, false),
        _ => (DELETED_PERSONA_NAME.to_string(), None, true),
    }
}

#[derive(FromRow)]
pub struct SqlPostView {
    pub id: i64,
    pub persona_id: i64,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub reply_count: i64,

    // Join 字段 (来自 personas 表)
    pub persona_name: Option<String>,
    pub persona_avatar_url: Option<String>,
    pub persona_deleted_at: Option<NaiveDateTime>,
}

impl From<SqlPostView> for PostView {
    fn from(sql: SqlPostView) -> Self {
        let (persona_name, persona_avatar_url, persona_deleted) = mask_persona(
            sql.persona_name,
            sql.persona_avatar_url,
            sql.persona_deleted_at,
        );
        PostView {
            id: sql.id,
            persona_id: sql.persona_id,
            persona_name,
            persona_avatar_url,
            persona_deleted,
            content: sql.content,
            image_url: sql.image_url,
            created_at: sql.created_at,
            reply_count: sql.reply_count,
        }
    }
}

#[derive(FromRow)]
pub struct SqlCommentView {
    pub id: i64,
    pub post_id: i64,
    pub persona_id: i64,
    pub content: String,
    pub reply_to_comment_id: Option<i64>,
    pub created_at: NaiveDateTime,

    // Join 字段 (来自 personas 表)
    pub persona_name: Option<String>,
    pub persona_avatar_url: Option<String>,
    pub persona_deleted_at: Option<NaiveDateTime>,
}

impl From<SqlCommentView> for CommentView {
    fn from(sql: SqlCommentView) -> Self {
        let (persona_name, persona_avatar_url, persona_deleted) = mask_persona(
            sql.persona_name,
            sql.persona_avatar_url,
            sql.persona_deleted_at,
        );
        CommentView {
            id: sql.id,
            post_id: sql.post_id,
            persona_id: sql.persona_id,
            persona_name,
            persona_avatar_url,
            persona_deleted,
            content: sql.content,
            reply_to_comment_id: sql.reply_to_comment_id,
            created_at: sql.created_at,
        }
    }
}
