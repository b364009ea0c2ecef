//! 日志初始化

use std::str::FromStr;

use crate::error::{HostError, HostResult};

/// 安装 stderr 上的 `fmt` 订阅者
///
/// 重复调用返回 `HostError::Logging`，不会 panic。
pub fn init(level: &str) -> HostResult<()> {
    let level = tracing::Level::from_str(level).map_err(|_| HostError::InvalidArgument {
        name: "log-level".to_string(),
        message: format!("未知的日志级别 '{level}'"),
    })?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| HostError::Logging(e.to_string()))
}
