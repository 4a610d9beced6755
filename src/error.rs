use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// 存储层不可用（连接失败、表已删除等）
    #[error("store unavailable: {0}")]
    StoreUnavailable(&'static str),

    #[error("invalid identifier format")]
    InvalidId,

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    InvalidPath(#[from] PathRejection),

    #[error("Not Found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Sqlx(_) | Error::StoreUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::InvalidId | Error::InvalidInput(_) | Error::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::InvalidPath(rejection) => rejection.status(),
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                "Internal Server Error".to_string()
            }
            Error::StoreUnavailable(reason) => {
                tracing::error!(%reason, "store unavailable");
                "Internal Server Error".to_string()
            }
            Error::InvalidBody(rejection) => rejection.body_text(),
            Error::InvalidPath(rejection) => rejection.body_text(),
            e => e.to_string(),
        };

        (
            status,
            Json(json!({
                "status": "error",
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let cases = vec![
            (Error::InvalidId, StatusCode::BAD_REQUEST),
            (Error::InvalidInput("title"), StatusCode::BAD_REQUEST),
            (Error::NotFound, StatusCode::NOT_FOUND),
            (Error::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                Error::StoreUnavailable("down"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                Error::Sqlx(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let desc = err.to_string();
            assert_eq!(err.into_response().status(), expected, "{}", desc);
        }
    }
}
