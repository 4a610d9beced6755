use std::future::Future;

use tracing::instrument;
use uuid::Uuid;

use super::DBPool;
use crate::{
    content::{Article, NewArticle},
    error::{Error, Result},
};

/// 文章的存储接口
pub trait ArticleStore: Clone + Send + Sync + 'static {
    /// 写入新文章，`description` 由正文派生
    ///
    /// 作者 `user_id` 不存在时返回 [`Error::NotFound`]。
    fn create_article(&self, new: &NewArticle) -> impl Future<Output = Result<Article>> + Send;

    /// 按主键查询文章
    ///
    /// 文章表被删除后必须返回错误，不能返回 `None`。
    fn find_article(&self, id: Uuid) -> impl Future<Output = Result<Option<Article>>> + Send;

    /// 删除整张文章表
    fn drop_articles(&self) -> impl Future<Output = Result<()>> + Send;
}

impl ArticleStore for DBPool {
    #[instrument(skip_all, err)]
    async fn create_article(&self, new: &NewArticle) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles
                (id, title, body, description, user_id, category_id, is_blacklisted, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, body, description, user_id, category_id,
                      is_blacklisted, is_published, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.body)
        .bind(new.description())
        .bind(new.user_id)
        .bind(new.category_id)
        .bind(new.is_blacklisted)
        .bind(new.is_published)
        .fetch_one(self)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_foreign_key_violation())
            {
                Error::NotFound
            } else {
                e.into()
            }
        })?;
        Ok(article)
    }

    #[instrument(skip(self), err)]
    async fn find_article(&self, id: Uuid) -> Result<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, body, description, user_id, category_id,
                   is_blacklisted, is_published, created_at, updated_at
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(article)
    }

    #[instrument(skip(self), err)]
    async fn drop_articles(&self) -> Result<()> {
        sqlx::query("DROP TABLE IF EXISTS articles")
            .execute(self)
            .await?;
        Ok(())
    }
}
