mod articles;
mod profile;
mod session;

use axum::Router;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    state::AppState,
    storage::{ArticleStore, ProfileStore},
};

pub use self::session::{CurrentUser, USER_ID_HEADER};

/// 成功响应的统一包装 `{ message, data }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    message: &'static str,
    data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}

/// 解析路径或会话中的标识符。
///
/// 只接受带连字符的标准格式（36 个字符），其他写法一律视为格式错误。
pub(crate) fn parse_id(raw: &str) -> Result<Uuid> {
    if raw.len() != 36 {
        return Err(Error::InvalidId);
    }
    Uuid::try_parse(raw).map_err(|_| Error::InvalidId)
}

/// 设置应用的路由。
///
/// 将 `/api/v1` 下的资料接口和文章接口组合在一起，并绑定应用状态。
pub fn setup_route<S>(app: AppState<S>) -> Router
where
    S: ProfileStore + ArticleStore,
{
    Router::new()
        .nest(
            "/api/v1",
            profile::setup_route::<S>().merge(articles::setup_route::<S>()),
        )
        .with_state(app)
}

/// 启动 HTTP 服务，在 `addr` 上监听并使用给定的路由处理请求。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, addr: &str) {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind TCP listener on {addr}: {e}"));

    tracing::info!("listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start Axum server");
}

/// 启动 HTTP 服务，自动设置路由和中间件。
pub async fn run_server<S>(app: AppState<S>, addr: &str)
where
    S: ProfileStore + ArticleStore,
{
    let router = setup_route(app);
    let router = add_middlewares(router);
    run_server_with_router(router, addr).await
}

/// 为路由添加中间件，包括请求追踪和失败日志记录。
fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        _latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_failure)
            .on_request(|_req: &_, _span: &tracing::Span| {
                // 空实现，关闭请求日志
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).expect("合法 uuid"), id);

        let invalid = vec![
            "".to_string(),
            "123".to_string(),
            format!("a{}", id),
            id.simple().to_string(),
            id.braced().to_string(),
            id.urn().to_string(),
            "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz".to_string(),
        ];
        for raw in invalid {
            assert!(matches!(parse_id(&raw), Err(Error::InvalidId)), "{}", raw);
        }
    }
}
