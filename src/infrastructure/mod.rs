//! 基础设施

pub mod logger;
