//! 日志基础设施

use tracing::Level;
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

pub struct Logger;

impl Logger {
    /// 初始化全局 subscriber
    ///
    /// `RUST_LOG` 优先于配置里的级别；WARN 及以上写 stderr，其余写 stdout。
    pub fn init(level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let writer = std::io::stderr
            .with_max_level(Level::WARN)
            .or_else(std::io::stdout);

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .init();
    }
}
