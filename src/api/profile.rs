use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use super::{CurrentUser, Envelope, parse_id};
use crate::{
    content::{ProfileUpdate, User},
    error::{Error, Result},
    state::AppState,
    storage::ProfileStore,
};

/// 配置用户资料相关路由。
///
/// 路由包括：
/// - `PATCH /profile`：更新当前用户资料
/// - `GET /profile/{id}`：按 id 获取用户资料
/// - `GET /profile`：缺少 id，返回 404
pub fn setup_route<S: ProfileStore>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/profile",
            get(profile_without_id::<S>).patch(update_profile::<S>),
        )
        .route("/profile/{id}", get(profile_by_id::<S>))
}

/// 对外展示的用户资料，不包含邮箱。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for ProfileView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            bio: user.bio,
            image: user.image,
            created_at: user.created_at.timestamp_millis(),
            updated_at: user.updated_at.timestamp_millis(),
        }
    }
}

/// 更新当前用户的资料。
///
/// 用户 id 来自会话，请求体只携带要修改的字段。
async fn update_profile<S: ProfileStore>(
    State(app): State<AppState<S>>,
    CurrentUser(user_id): CurrentUser,
    payload: core::result::Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<Envelope<ProfileView>>> {
    let Json(update) = payload?;

    let user = app
        .store()
        .update_profile(user_id, &update)
        .await?
        .ok_or(Error::NotFound)?;

    tracing::debug!(%user_id, "profile updated");

    Ok(Json(Envelope::new(
        "Profile updated successfully",
        user.into(),
    )))
}

/// 根据 id 获取用户资料。
///
/// 依次检查：缺少 id 返回 [`Error::NotFound`]，格式错误返回 [`Error::InvalidId`]，
/// 记录不存在返回 [`Error::NotFound`]。
async fn get_user_profile<S: ProfileStore>(store: &S, raw_id: Option<&str>) -> Result<User> {
    let raw_id = raw_id.ok_or(Error::NotFound)?;
    let id = parse_id(raw_id)?;

    store.find_user(id).await?.ok_or(Error::NotFound)
}

async fn profile_by_id<S: ProfileStore>(
    State(app): State<AppState<S>>,
    raw_id: core::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<ProfileView>>> {
    let Path(raw_id) = raw_id?;
    let user = get_user_profile(app.store(), Some(&raw_id)).await?;
    Ok(Json(Envelope::new("User profile", user.into())))
}

async fn profile_without_id<S: ProfileStore>(
    State(app): State<AppState<S>>,
) -> Result<Json<Envelope<ProfileView>>> {
    let user = get_user_profile(app.store(), None).await?;
    Ok(Json(Envelope::new("User profile", user.into())))
}
