use tokio::net::TcpListener;
use tracing::info;
use user_api::app::{build_app, docs::DOCS_PATH};
use user_api::core::config::load_config;
use user_api::infrastructure::logger::Logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    Logger::init(&config.logging.level);

    match source {
        Some(path) => info!("从配置文件加载: {}", path),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let app = build_app(&config)?;

    let listener = TcpListener::bind(config.http.listen_addr()).await?;

    let public_url = config.http.public_url();
    info!("🚀 Server running at {}", public_url);
    info!("📖 API docs at {}{}", public_url, DOCS_PATH);

    axum::serve(listener, app).await?;
    Ok(())
}
