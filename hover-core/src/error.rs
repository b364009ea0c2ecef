//! # Error 模块
//!
//! 定义配置解析过程中的错误类型。

use thiserror::Error;

use crate::source::ConfigOrigin;

/// 配置解析错误
///
/// `InvalidSerialization` 与 `WrongShape` 终止本轮解析（结果为空序列）；
/// `ItemCoercionIgnored` 不是真正的错误，只记录被丢弃的字段值。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化形式无法解析为结构化数据
    #[error("{origin} 中的 JSON 无效: {message}")]
    InvalidSerialization {
        origin: ConfigOrigin,
        raw: String,
        message: String,
    },

    /// 数据不是有序列表
    #[error("{origin} 必须是数组，实际为 {found}")]
    WrongShape {
        origin: ConfigOrigin,
        raw: String,
        found: &'static str,
    },

    /// 单项字段无法转换为数值，已按缺省处理
    #[error("第 {index} 项的字段 '{field}' 无效（{raw}），使用默认值")]
    ItemCoercionIgnored {
        index: usize,
        field: &'static str,
        raw: String,
    },
}

impl ConfigError {
    /// 是否终止本轮解析
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ItemCoercionIgnored { .. })
    }

    /// 出错的配置来源（单项转换提示没有来源）
    pub fn origin(&self) -> Option<ConfigOrigin> {
        match self {
            Self::InvalidSerialization { origin, .. } | Self::WrongShape { origin, .. } => {
                Some(*origin)
            }
            Self::ItemCoercionIgnored { .. } => None,
        }
    }

    /// 引发错误的原始值
    pub fn raw(&self) -> &str {
        match self {
            Self::InvalidSerialization { raw, .. }
            | Self::WrongShape { raw, .. }
            | Self::ItemCoercionIgnored { raw, .. } => raw,
        }
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let err = ConfigError::WrongShape {
            origin: ConfigOrigin::Attribute,
            raw: "{}".to_string(),
            found: "object",
        };
        assert!(err.is_fatal());
        assert_eq!(err.origin(), Some(ConfigOrigin::Attribute));

        let note = ConfigError::ItemCoercionIgnored {
            index: 2,
            field: "strength",
            raw: "\"abc\"".to_string(),
        };
        assert!(!note.is_fatal());
        assert_eq!(note.origin(), None);
        assert_eq!(note.raw(), "\"abc\"");
    }

    #[test]
    fn test_error_display_names_origin() {
        let err = ConfigError::InvalidSerialization {
            origin: ConfigOrigin::Property,
            raw: "{not json".to_string(),
            message: "key must be a string".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("images 属性值"));
        assert!(display.contains("key must be a string"));
    }
}
