//! 应用层：路由组装、欢迎页与 API 文档

pub mod docs;
pub mod users;

use axum::{
    http::{Method, StatusCode, Uri},
    routing::get,
    Router,
};

use crate::core::{config::Config, middleware};
use docs::DocsPublisher;
use users::{
    handler::AppState,
    service::{id_strategy, UserService},
};

pub const WELCOME_MESSAGE: &str = "Welcome to my API";

/// Welcome route
///
/// Returns a welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "welcome",
    responses(
        (status = 200, description = "Success", body = String, content_type = "text/plain")
    )
)]
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// 未匹配的路径
async fn not_found(method: Method, uri: Uri) -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        format!("Cannot {} {}", method, uri.path()),
    )
}

/// 按配置构造状态和文档，返回挂好中间件的完整应用
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let state = AppState {
        user_service: UserService::with_id_strategy(id_strategy(config.users.id_strategy)),
        lookup: config.users.lookup,
    };
    let docs = DocsPublisher::new(&config.http.public_url())?;

    Ok(build_router(state, docs))
}

pub fn build_router(state: AppState, docs: DocsPublisher) -> Router {
    let router = Router::new()
        .route("/", get(welcome))
        .merge(users::handler::routes(state))
        .merge(docs.routes())
        .fallback(not_found);

    middleware::apply(router)
}
