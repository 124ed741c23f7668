//! 核心模块：配置、错误、中间件与通用响应

pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
