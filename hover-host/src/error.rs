//! # Error 模块
//!
//! 宿主层错误类型。配置解析本身的错误不在这里，
//! 它们只以诊断形式出现，不会中断宿主。

use thiserror::Error;

/// 宿主错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// 自定义元素名称不合法
    #[error("无效的元素名称 '{name}'：必须为小写且包含 '-'")]
    InvalidElementName { name: String },

    /// 元素未注册
    #[error("元素 '{name}' 尚未注册")]
    UndefinedElement { name: String },

    /// 子元素序号越界
    #[error("子元素序号 {index} 越界，共有 {len} 个子元素")]
    ChildOutOfRange { index: usize, len: usize },

    /// 配置序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),

    /// 配置验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),

    /// 命令行参数无效
    #[error("参数 '{name}' 无效: {message}")]
    InvalidArgument { name: String, message: String },

    /// 日志初始化失败
    #[error("日志初始化失败: {0}")]
    Logging(String),
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
