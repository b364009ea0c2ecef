//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (hover.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use hover_core::StyleOptions;

use crate::error::{HostError, HostResult};

/// 宿主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// 自定义元素名称
    #[serde(default = "default_tag_name")]
    pub tag_name: String,

    /// 承载 JSON 配置的特性名
    #[serde(default = "default_observed_attribute")]
    pub observed_attribute: String,

    /// 样式配置
    #[serde(default)]
    pub style: StyleConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 样式配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// 容器透视距离（像素）
    #[serde(default = "default_perspective_px")]
    pub perspective_px: f64,

    /// 关键帧名称
    #[serde(default = "default_keyframes_name")]
    pub keyframes_name: String,

    /// 缓动函数
    #[serde(default = "default_easing")]
    pub easing: String,

    /// 图片混合模式
    #[serde(default = "default_blend_mode")]
    pub blend_mode: String,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// 最低日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub level: String,
}

// 默认值函数
fn default_tag_name() -> String {
    "hovering-images".to_string()
}

fn default_observed_attribute() -> String {
    "images".to_string()
}

fn default_perspective_px() -> f64 {
    800.0
}

fn default_keyframes_name() -> String {
    "float-anim".to_string()
}

fn default_easing() -> String {
    "ease-in-out".to_string()
}

fn default_blend_mode() -> String {
    "multiply".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tag_name: default_tag_name(),
            observed_attribute: default_observed_attribute(),
            style: StyleConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            perspective_px: default_perspective_px(),
            keyframes_name: default_keyframes_name(),
            easing: default_easing(),
            blend_mode: default_blend_mode(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl HostConfig {
    /// 加载配置文件
    ///
    /// 文件必须存在且是合法的 JSON；缺省字段使用默认值。
    /// 读取失败返回 [`HostError::Io`]，解析失败返回 [`HostError::ValidationFailed`]。
    pub fn load(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| HostError::Io(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content).map_err(|e| {
            HostError::ValidationFailed(format!("配置文件解析失败 {}: {e}", path.display()))
        })
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> HostResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| HostError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| HostError::Io(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> HostResult<()> {
        if !is_valid_element_name(&self.tag_name) {
            return Err(HostError::InvalidElementName {
                name: self.tag_name.clone(),
            });
        }

        if self.observed_attribute.is_empty() {
            return Err(HostError::ValidationFailed(
                "observed_attribute 不能为空".to_string(),
            ));
        }

        if !(self.style.perspective_px.is_finite() && self.style.perspective_px > 0.0) {
            return Err(HostError::ValidationFailed(
                "perspective_px 必须是正数".to_string(),
            ));
        }

        if self.style.keyframes_name.is_empty() || self.style.easing.is_empty() {
            return Err(HostError::ValidationFailed(
                "keyframes_name 和 easing 不能为空".to_string(),
            ));
        }

        tracing::Level::from_str(&self.log.level).map_err(|_| {
            HostError::ValidationFailed(format!("未知的日志级别: {}", self.log.level))
        })?;

        Ok(())
    }

    /// 生成核心库使用的样式选项
    pub fn style_options(&self) -> StyleOptions {
        StyleOptions {
            keyframes_name: self.style.keyframes_name.clone(),
            easing: self.style.easing.clone(),
        }
    }
}

/// 自定义元素名称：ASCII 字母开头、全小写、包含 `-`
pub fn is_valid_element_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.contains('-')
        && name.chars().all(is_element_name_char)
}

fn is_element_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')
}
