//! # 用户示例 API
//!
//! 基于 Axum 的小型 HTTP 服务：
//! - `GET /` 欢迎信息
//! - `GET /users`、`GET /users/{id}`、`POST /users` 内存用户存储
//! - `GET /api-docs` 由路由注解生成的 OpenAPI 文档
//! - 请求日志与统一错误处理中间件

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_app, build_router};
pub use crate::core::config::Config;
pub use crate::core::error::CoreError;
