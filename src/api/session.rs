use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::parse_id;
use crate::error::{Error, Result};

/// 外层认证服务写入的调用者标识头
pub const USER_ID_HEADER: &str = "x-user-id";

/// 当前已认证的调用者
///
/// 认证本身由外层服务完成，这里只读取它转发的用户标识。
/// 缺失或格式错误时返回 [`Error::Unauthorized`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(Error::Unauthorized)?;

        parse_id(raw)
            .map(CurrentUser)
            .map_err(|_| Error::Unauthorized)
    }
}
