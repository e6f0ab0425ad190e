use crate::Db;
use chrono::Utc;
use domain::{validate, ForumError};

impl Db {
    /// 在存活帖子下新增评论。reply_to_comment_id 如果给出，
    /// 必须指向同一帖子下的存活评论。
    pub async fn create_comment(
        &self,
        post_id: i64,
        persona_name: &str,
        content: &str,
        reply_to_comment_id: Option<i64>,
    ) -> Result<i64, ForumError> {
        let persona_name = validate::trimmed(persona_name).ok_or(ForumError::PersonaRequired)?;
        let content = validate::trimmed(content).ok_or(ForumError::ContentRequired)?;

        let live_post = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM posts WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ForumError::database)?;
        if live_post.is_none() {
            return Err(ForumError::PostNotFound);
        }

        let persona = self
            .find_live_persona(persona_name)
            .await?
            .ok_or(ForumError::PersonaNotFound)?;

        if let Some(reply_id) = reply_to_comment_id {
            let target_post = sqlx::query_scalar::<_, i64>(
                "SELECT post_id FROM comments WHERE id = ? AND deleted_at IS NULL",
            )
            .bind(reply_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ForumError::database)?;
            // 回复不允许跨帖
            if target_post != Some(post_id) {
                return Err(ForumError::ReplyTargetInvalid);
            }
        }

        let now = Utc::now().naive_utc();
        let res = sqlx::query(
            r#"
            INSERT INTO comments (post_id, persona_id, content, reply_to_comment_id, created_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(post_id)
        .bind(persona.id)
        .bind(content)
        .bind(reply_to_comment_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(ForumError::database)?;

        Ok(res.last_insert_rowid())
    }
}
