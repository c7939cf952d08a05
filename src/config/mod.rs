//! 应用配置模块
//!
//! 配置来源优先级：config.toml < config.{env}.toml < LEARNSYNC_* 环境变量。

mod r#impl;
mod structs;

pub use structs::*;
