//! 核心中间件模块
//!
//! 管线顺序（由外到内）：CORS → Trace → 请求日志 → panic 捕获 → 路由处理器。

use std::any::Any;
use std::backtrace::Backtrace;
use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use chrono::{SecondsFormat, Utc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info};

use super::error::internal_error_response;

/// 请求日志中间件
///
/// 在进入处理器之前记录一行 `[时间戳] 方法 request to 路径`，然后无条件转发。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    info!(
        "[{}] {} request to {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        method,
        uri
    );

    let response = next.run(req).await;

    debug!(
        "{} {} - {} - {}ms",
        method,
        uri,
        response.status(),
        start.elapsed().as_millis()
    );

    response
}

/// 错误处理：处理器 panic 时记录诊断信息并返回通用 500
///
/// 调用栈在 `RUST_BACKTRACE` 开启时才会真正采集。
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "未知的 panic 负载".to_string()
    };

    error!(panic = %detail, backtrace = %Backtrace::capture(), "处理器发生 panic");
    internal_error_response()
}

/// 给路由挂上完整的中间件管线
pub fn apply(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
}
