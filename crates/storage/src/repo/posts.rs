use crate::{
    models::{SqlCommentView, SqlPostView},
    Db,
};
use chrono::Utc;
use domain::{validate, ForumError, PostDetail, PostView, SortOrder};

const POST_VIEW_COLUMNS: &str = r#"
    p.id, p.persona_id, p.content, p.image_url, p.created_at,
    (SELECT COUNT(*) FROM comments c
     WHERE c.post_id = p.id AND c.deleted_at IS NULL) AS reply_count,
    pe.name AS persona_name,
    pe.avatar_url AS persona_avatar_url,
    pe.deleted_at AS persona_deleted_at
"#;

impl Db {
    pub async fn create_post(
        &self,
        persona_name: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<i64, ForumError> {
        let persona_name = validate::trimmed(persona_name).ok_or(ForumError::PersonaRequired)?;
        let content = validate::trimmed(content).ok_or(ForumError::ContentRequired)?;
        let image_url = validate::optional_url(image_url, ForumError::ImageUrlInvalid)?;

        let persona = self
            .find_live_persona(persona_name)
            .await?
            .ok_or(ForumError::PersonaNotFound)?;

        let now = Utc::now().naive_utc();
        let res = sqlx::query(
            r#"
            INSERT INTO posts (persona_id, content, image_url, created_at, deleted_at)
            VALUES (?, ?, ?, ?, NULL)
            "#,
        )
        .bind(persona.id)
        .bind(content)
        .bind(image_url)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(ForumError::database)?;

        Ok(res.last_insert_rowid())
    }

    /// 帖子列表：只含存活行，带作者展示字段和存活评论数
    pub async fn list_posts(&self, sort: SortOrder) -> Result<Vec<PostView>, ForumError> {
        let order = match sort {
            SortOrder::New => "p.created_at DESC, p.id DESC",
            SortOrder::Hot => "reply_count DESC, p.created_at DESC, p.id DESC",
        };
        let sql = format!(
            r#"
            SELECT {POST_VIEW_COLUMNS}
            FROM posts p
            LEFT JOIN personas pe ON pe.id = p.persona_id
            WHERE p.deleted_at IS NULL
            ORDER BY {order}
            "#
        );

        let rows = sqlx::query_as::<_, SqlPostView>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(ForumError::database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 帖子详情 + 存活评论（created_at 升序，平局按 id 升序）
    pub async fn get_post_with_comments(&self, id: i64) -> Result<PostDetail, ForumError> {
        let sql = format!(
            r#"
            SELECT {POST_VIEW_COLUMNS}
            FROM posts p
            LEFT JOIN personas pe ON pe.id = p.persona_id
            WHERE p.id = ? AND p.deleted_at IS NULL
            "#
        );
        let post = sqlx::query_as::<_, SqlPostView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ForumError::database)?
            .ok_or(ForumError::NotFound)?;

        let comments = sqlx::query_as::<_, SqlCommentView>(
            r#"
            SELECT
                c.id, c.post_id, c.persona_id, c.content,
                c.reply_to_comment_id, c.created_at,
                pe.name AS persona_name,
                pe.avatar_url AS persona_avatar_url,
                pe.deleted_at AS persona_deleted_at
            FROM comments c
            LEFT JOIN personas pe ON pe.id = c.persona_id
            WHERE c.post_id = ? AND c.deleted_at IS NULL
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(ForumError::database)?;

        Ok(PostDetail {
            post: post.into(),
            comments: comments.into_iter().map(Into::into).collect(),
        })
    }

    /// 软删除帖子并级联其全部评论，单事务提交。
    /// 读者要么看到帖子和评论都在，要么都不在。
    pub async fn soft_delete_post(&self, id: i64) -> Result<(), ForumError> {
        let mut tx = self.pool.begin().await.map_err(ForumError::database)?;

        let deleted_at = sqlx::query_scalar::<_, Option<chrono::NaiveDateTime>>(
            "SELECT deleted_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(ForumError::database)?;

        match deleted_at {
            None => Err(ForumError::NotFound),
            Some(Some(_)) => Ok(()),
            Some(None) => {
                let now = Utc::now().naive_utc();
                sqlx::query("UPDATE comments SET deleted_at = ? WHERE post_id = ?")
                    .bind(now)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(ForumError::database)?;
                sqlx::query("UPDATE posts SET deleted_at = ? WHERE id = ?")
                    .bind(now)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(ForumError::database)?;
                tx.commit().await.map_err(ForumError::database)?;
                Ok(())
            }
        }
    }
}
