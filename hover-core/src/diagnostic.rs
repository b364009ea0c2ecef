//! # 诊断模块
//!
//! 把解析错误整理成可展示的诊断条目，不依赖 IO 或日志框架。
//!
//! ## 设计原则
//!
//! - 诊断分级：Error（本轮解析终止）、Warn（字段被忽略）
//! - 每条诊断标明来源（特性/属性值/子元素）和原始值
//! - 输出交给宿主决定如何记录

use crate::error::ConfigError;
use crate::source::ConfigOrigin;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 警告（字段已降级）
    Warn,
    /// 错误（本轮解析结果为空）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 配置来源
    pub origin: ConfigOrigin,
    /// 列表项序号（如果可定位，从 0 开始）
    pub index: Option<usize>,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（通常是原始值）
    pub detail: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, origin: ConfigOrigin, message: impl Into<String>) -> Self {
        Self {
            level,
            origin,
            index: None,
            message: message.into(),
            detail: None,
        }
    }

    /// 创建错误诊断
    pub fn error(origin: ConfigOrigin, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, origin, message)
    }

    /// 创建警告诊断
    pub fn warn(origin: ConfigOrigin, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, origin, message)
    }

    /// 设置列表项序号
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// 由解析错误生成诊断
    ///
    /// `fallback_origin` 用于没有自带来源的单项转换提示。
    pub fn from_error(error: &ConfigError, fallback_origin: ConfigOrigin) -> Self {
        let origin = error.origin().unwrap_or(fallback_origin);
        match error {
            ConfigError::ItemCoercionIgnored { index, .. } => {
                Self::warn(origin, error.to_string()).with_index(*index)
            }
            _ => Self::error(origin, error.to_string()).with_detail(error.raw()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.origin)?;
        if let Some(index) = self.index {
            write!(f, "#{}", index)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .count()
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
            .count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warn(ConfigOrigin::Attribute, "字段被忽略")
            .with_index(3)
            .with_detail("\"abc\"");

        let display = format!("{}", diag);
        assert!(display.contains("[WARN]"));
        assert!(display.contains("images 特性#3"));
        assert!(display.contains("  | \"abc\""));
    }

    #[test]
    fn test_from_fatal_error_keeps_raw_value() {
        let err = ConfigError::InvalidSerialization {
            origin: ConfigOrigin::Attribute,
            raw: "{not json".to_string(),
            message: "EOF".to_string(),
        };
        let diag = Diagnostic::from_error(&err, ConfigOrigin::Children);

        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.origin, ConfigOrigin::Attribute);
        assert_eq!(diag.detail.as_deref(), Some("{not json"));
    }

    #[test]
    fn test_from_coercion_note_uses_fallback_origin() {
        let note = ConfigError::ItemCoercionIgnored {
            index: 1,
            field: "data-z",
            raw: "\"deep\"".to_string(),
        };
        let diag = Diagnostic::from_error(&note, ConfigOrigin::Children);

        assert_eq!(diag.level, DiagnosticLevel::Warn);
        assert_eq!(diag.origin, ConfigOrigin::Children);
        assert_eq!(diag.index, Some(1));
    }

    #[test]
    fn test_diagnostic_result_merge() {
        let mut total = DiagnosticResult::new();
        total.push(Diagnostic::error(ConfigOrigin::Attribute, "错误1"));

        let mut other = DiagnosticResult::new();
        other.push(Diagnostic::warn(ConfigOrigin::Property, "警告1").with_index(0));
        other.push(Diagnostic::warn(ConfigOrigin::Children, "警告2").with_index(2));
        total.merge(other);

        assert_eq!(total.len(), 3);
        assert_eq!(total.error_count(), 1);
        assert_eq!(total.warn_count(), 2);
        assert!(total.has_errors());
        // 合并保持原有顺序
        assert_eq!(total.diagnostics[2].message, "警告2");
    }
}
