//! 核心响应处理模块

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 只带一条提示信息的响应体，用于 400 和 500
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Name and age are required")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
