use crate::{models::SqlPersona, Db};
use chrono::Utc;
use domain::{validate, ForumError, Persona};

impl Db {
    /// 注册新 persona，返回分配的 id。
    /// 名称大小写不敏感唯一，只和存活行比较；软删除行不占用名称。
    pub async fn create_persona(
        &self,
        name: &str,
        avatar_url: Option<&str>,
        bio: Option<&str>,
        creator: Option<&str>,
    ) -> Result<i64, ForumError> {
        let name = validate::persona_name(name)?;
        let avatar_url = validate::optional_url(avatar_url, ForumError::AvatarUrlInvalid)?;
        let bio = bio.and_then(validate::trimmed);
        let creator = creator.and_then(validate::trimmed);

        // 先查一次给出明确错误码；并发窗口由部分唯一索引兜底
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM personas WHERE lower(name) = lower(?) AND deleted_at IS NULL",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(ForumError::database)?;
        if taken.is_some() {
            return Err(ForumError::NameExists);
        }

        let now = Utc::now().naive_utc();
        let res = sqlx::query(
            r#"
            INSERT INTO personas (name, avatar_url, bio, creator, created_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(name)
        .bind(avatar_url)
        .bind(bio)
        .bind(creator)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                ForumError::NameExists
            } else {
                ForumError::database(e)
            }
        })?;

        Ok(res.last_insert_rowid())
    }

    /// 全量列表（含软删除行）：存活在前，名称不分大小写字母序
    pub async fn list_personas(&self) -> Result<Vec<Persona>, ForumError> {
        let rows = sqlx::query_as::<_, SqlPersona>(
            r#"
            SELECT id, name, avatar_url, bio, creator, created_at, deleted_at
            FROM personas
            ORDER BY (deleted_at IS NOT NULL) ASC, name COLLATE NOCASE ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(ForumError::database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 软删除。重复删除是幂等成功；id 从未存在过才算 NOT_FOUND。
    pub async fn soft_delete_persona(&self, id: i64) -> Result<(), ForumError> {
        let deleted_at = sqlx::query_scalar::<_, Option<chrono::NaiveDateTime>>(
            "SELECT deleted_at FROM personas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ForumError::database)?;

        match deleted_at {
            None => Err(ForumError::NotFound),
            Some(Some(_)) => Ok(()),
            Some(None) => {
                let now = Utc::now().naive_utc();
                sqlx::query("UPDATE personas SET deleted_at = ? WHERE id = ?")
                    .bind(now)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(ForumError::database)?;
                Ok(())
            }
        }
    }

    /// 发帖/评论时按名字挂接作者：只匹配存活行
    pub(crate) async fn find_live_persona(&self, name: &str) -> Result<Option<Persona>, ForumError> {
        let row = sqlx::query_as::<_, SqlPersona>(
            r#"
            SELECT id, name, avatar_url, bio, creator, created_at, deleted_at
            FROM personas
            WHERE lower(name) = lower(?) AND deleted_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(ForumError::database)?;

        Ok(row.map(Into::into))
    }
}
