//! API 文档发布
//!
//! 启动时根据各处理器上的 `#[utoipa::path]` 注解生成 OpenAPI 文档，渲染一次后
//! 在 `/api-docs` 提供 Swagger UI，在 `/api-docs/openapi.json` 提供文档本身。

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use utoipa::openapi::{self, Server};
use utoipa::OpenApi;

use super::users::model::{CreateUserRequest, CreateUserResponse, User};
use crate::core::response::ErrorResponse;

pub const DOCS_PATH: &str = "/api-docs";
pub const SPEC_PATH: &str = "/api-docs/openapi.json";

/// Swagger UI 使用的 CDN 版本
const SWAGGER_UI_VERSION: &str = "5.18.2";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "My API",
        version = "1.0.0",
        description = "A simple Express API with 4 routes"
    ),
    paths(
        crate::app::welcome,
        crate::app::users::handler::list_users,
        crate::app::users::handler::get_user,
        crate::app::users::handler::create_user,
    ),
    components(schemas(User, CreateUserRequest, CreateUserResponse, ErrorResponse)),
    tags(
        (name = "welcome", description = "Welcome message"),
        (name = "users", description = "In-memory user store")
    )
)]
pub struct ApiDoc;

/// 生成带 servers 信息的完整文档
pub fn document(server_url: &str) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(server_url)]);
    doc
}

/// 启动时渲染好的文档和浏览页面
#[derive(Clone)]
pub struct DocsPublisher {
    spec_json: Arc<str>,
    html: Arc<str>,
}

impl DocsPublisher {
    pub fn new(server_url: &str) -> Result<Self, serde_json::Error> {
        let doc = document(server_url);
        let spec_json = doc.to_pretty_json()?;
        let html = swagger_html(&doc.info.title, SPEC_PATH);

        Ok(Self {
            spec_json: Arc::from(spec_json),
            html: Arc::from(html),
        })
    }

    pub fn spec_json(&self) -> &str {
        &self.spec_json
    }

    pub fn routes(self) -> Router {
        Router::new()
            .route(DOCS_PATH, get(explorer))
            .route("/api-docs/", get(explorer))
            .route(SPEC_PATH, get(spec))
            .with_state(self)
    }
}

async fn explorer(State(publisher): State<DocsPublisher>) -> Html<String> {
    Html(publisher.html.to_string())
}

async fn spec(State(publisher): State<DocsPublisher>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        publisher.spec_json.to_string(),
    )
}

/// Swagger UI 页面，资源从 CDN 加载，文档通过 `spec_url` 拉取
fn swagger_html(title: &str, spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Swagger UI</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
    <style>
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: '{spec_url}',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            }});
        }};
    </script>
</body>
</html>"##,
        title = html_escape(title),
        version = SWAGGER_UI_VERSION,
        spec_url = spec_url,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
