use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CurrentUser, Envelope, parse_id};
use crate::{
    content::{Article, NewArticle},
    error::{Error, Result},
    state::AppState,
    storage::ArticleStore,
};

/// 配置文章相关路由。
///
/// 路由包括：
/// - `POST /articles`：以当前用户身份创建文章
/// - `GET /articles/{id}`：获取单篇文章
pub fn setup_route<S: ArticleStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/articles", post(create_article::<S>))
        .route("/articles/{id}", get(article::<S>))
}

/// 创建文章的请求体。
///
/// `description` 即使出现在请求中也会被忽略。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    title: String,
    body: String,
    category_id: i32,
    #[serde(default)]
    is_blacklisted: bool,
    #[serde(default)]
    is_published: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub description: String,
    pub user_id: Uuid,
    pub category_id: i32,
    pub is_blacklisted: bool,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Article> for ArticleView {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            body: a.body,
            description: a.description,
            user_id: a.user_id,
            category_id: a.category_id,
            is_blacklisted: a.is_blacklisted,
            is_published: a.is_published,
            created_at: a.created_at.timestamp_millis(),
            updated_at: a.updated_at.timestamp_millis(),
        }
    }
}

async fn create_article<S: ArticleStore>(
    State(app): State<AppState<S>>,
    CurrentUser(user_id): CurrentUser,
    payload: core::result::Result<Json<CreateArticle>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<ArticleView>>)> {
    let Json(req) = payload?;

    if req.title.trim().is_empty() {
        return Err(Error::InvalidInput("title must not be empty"));
    }
    if req.body.trim().is_empty() {
        return Err(Error::InvalidInput("body must not be empty"));
    }

    let new = NewArticle {
        title: req.title,
        body: req.body,
        user_id,
        category_id: req.category_id,
        is_blacklisted: req.is_blacklisted,
        is_published: req.is_published,
    };

    let article = app.store().create_article(&new).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Article created", article.into())),
    ))
}

/// 根据 id 获取单篇文章，校验顺序与用户资料一致。
async fn article<S: ArticleStore>(
    State(app): State<AppState<S>>,
    raw_id: core::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<ArticleView>>> {
    let Path(raw_id) = raw_id?;
    let id = parse_id(&raw_id)?;

    let article = app.store().find_article(id).await?.ok_or(Error::NotFound)?;

    Ok(Json(Envelope::new("Article", article.into())))
}
