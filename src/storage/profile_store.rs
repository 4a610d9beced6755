use std::future::Future;

use tracing::instrument;
use uuid::Uuid;

use super::DBPool;
use crate::{
    content::{NewUser, ProfileUpdate, User},
    error::{Error, Result},
};

/// 用户资料的存储接口
///
/// 处理函数只依赖此接口，测试时可替换为 [`MemoryStore`](super::MemoryStore)。
pub trait ProfileStore: Clone + Send + Sync + 'static {
    /// 按主键查询用户，不存在返回 `None`
    fn find_user(&self, id: Uuid) -> impl Future<Output = Result<Option<User>>> + Send;

    /// 将部分字段写入指定用户并返回更新后的记录，用户不存在返回 `None`
    fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<Option<User>>> + Send;

    /// 写入新用户（注册流程使用）
    fn create_user(&self, new_user: &NewUser) -> impl Future<Output = Result<User>> + Send;
}

impl ProfileStore for DBPool {
    #[instrument(skip(self), err)]
    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, bio, image, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self), err)]
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                bio = COALESCE($2, bio),
                image = COALESCE($3, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, bio, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.bio.as_deref())
        .bind(update.image.as_deref())
        .fetch_optional(self)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self), err)]
    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, bio, image, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .fetch_one(self)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                Error::InvalidInput("username or email already taken")
            } else {
                e.into()
            }
        })?;
        Ok(user)
    }
}
