//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// 对外统一的 500 提示，不暴露内部原因
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 请求参数缺失或请求体无法解析，以 JSON `{message}` 返回
    #[error("{0}")]
    BadRequest(String),
    /// 资源不存在，以纯文本返回
    #[error("{0}")]
    NotFound(String),
    /// 未分类的内部故障，统一转成 500
    #[error("内部错误: {0}")]
    Internal(String),
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
            }
            CoreError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            CoreError::Internal(detail) => {
                error!(error = %detail, "请求处理失败");
                internal_error_response()
            }
        }
    }
}

/// 通用 500 响应，错误处理中间件和 `CoreError::Internal` 共用
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_is_json_message() {
        let response = CoreError::BadRequest("Name and age are required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            r#"{"message":"Name and age are required"}"#
        );
    }

    #[tokio::test]
    async fn test_not_found_is_plain_text() {
        let response = CoreError::NotFound("User not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_string(response).await, "User not found");
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let response = CoreError::Internal("用户存储锁已中毒".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            r#"{"message":"Something went wrong!"}"#
        );
    }
}
