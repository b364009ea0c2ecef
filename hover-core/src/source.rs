//! # Source 模块
//!
//! 配置来源及其优先级选择。
//!
//! ## 优先级
//!
//! 1. `images` 特性（JSON 字符串，非空即生效）
//! 2. `images` 属性值（结构化数据或 JSON 字符串，非 null 即生效）
//! 3. 子元素（`<img>` 或带 `data-src` 的元素，按文档顺序）
//!
//! 每轮解析只使用一个来源，不合并，也不在出错后回退到下一个来源。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// 配置来源标识，用于诊断输出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    /// 标记中的 `images` 特性
    Attribute,
    /// 通过代码设置的 `images` 属性值
    Property,
    /// 子元素
    Children,
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute => write!(f, "images 特性"),
            Self::Property => write!(f, "images 属性值"),
            Self::Children => write!(f, "子元素"),
        }
    }
}

/// 子元素的原始记录
///
/// 只保存标签名和属性，属性名统一为小写。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawItem {
    /// 小写标签名
    pub tag: String,
    /// 属性表
    pub attributes: BTreeMap<String, String>,
}

impl RawItem {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// 链式设置属性
    /// 添加特性，特性名统一为小写
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// 读取特性（特性名不区分大小写）
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.attributes.get(&name).map(String::as_str)
    }

    /// 是否参与结构回退：`<img>` 或带 `data-src` 的元素
    pub fn is_qualifying(&self) -> bool {
        self.tag.eq_ignore_ascii_case("img") || self.attributes.contains_key("data-src")
    }
}

/// 本轮解析使用的配置来源
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// 已结构化的列表
    Explicit(Vec<Value>),
    /// 需要解析的 JSON 字符串
    Serialized { origin: ConfigOrigin, text: String },
    /// 从合格子元素推导
    Structural(Vec<RawItem>),
}

impl ConfigSource {
    /// 按优先级选择来源
    ///
    /// 属性值存在但既不是字符串也不是数组时返回 `WrongShape`。
    pub fn select(
        attribute: Option<&str>,
        property: Option<&Value>,
        children: &[RawItem],
    ) -> ConfigResult<Self> {
        if let Some(text) = attribute.filter(|s| !s.is_empty()) {
            return Ok(Self::Serialized {
                origin: ConfigOrigin::Attribute,
                text: text.to_string(),
            });
        }

        match property {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => {
                return Ok(Self::Serialized {
                    origin: ConfigOrigin::Property,
                    text: text.clone(),
                });
            }
            Some(Value::Array(items)) => return Ok(Self::Explicit(items.clone())),
            Some(other) => {
                return Err(ConfigError::WrongShape {
                    origin: ConfigOrigin::Property,
                    raw: other.to_string(),
                    found: json_type_name(other),
                });
            }
        }

        Ok(Self::Structural(
            children
                .iter()
                .filter(|item| item.is_qualifying())
                .cloned()
                .collect(),
        ))
    }

    pub fn origin(&self) -> ConfigOrigin {
        match self {
            Self::Explicit(_) => ConfigOrigin::Property,
            Self::Serialized { origin, .. } => *origin,
            Self::Structural(_) => ConfigOrigin::Children,
        }
    }
}

/// 解析 JSON 字符串形式的列表
pub fn parse_serialized(origin: ConfigOrigin, text: &str) -> ConfigResult<Vec<Value>> {
    let parsed: Value =
        serde_json::from_str(text).map_err(|e| ConfigError::InvalidSerialization {
            origin,
            raw: text.to_string(),
            message: e.to_string(),
        })?;

    match parsed {
        Value::Array(items) => Ok(items),
        other => Err(ConfigError::WrongShape {
            origin,
            raw: text.to_string(),
            found: json_type_name(&other),
        }),
    }
}

/// JSON 值的类型名
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_wins_over_property() {
        let property = json!([{ "src": "prop.png" }]);
        let source =
            ConfigSource::select(Some(r#"[{"src":"attr.png"}]"#), Some(&property), &[]).unwrap();

        assert_eq!(
            source,
            ConfigSource::Serialized {
                origin: ConfigOrigin::Attribute,
                text: r#"[{"src":"attr.png"}]"#.to_string(),
            }
        );
    }

    #[test]
    fn test_raw_item_attribute_names_ignore_case() {
        let item = RawItem::new("div").with_attribute("DATA-SRC", "a.png");
        assert_eq!(item.attribute("data-src"), Some("a.png"));
        assert_eq!(item.attribute("Data-Src"), Some("a.png"));
        assert!(item.is_qualifying());
    }

    #[test]
    fn test_empty_attribute_is_unset() {
        let property = json!([]);
        let source = ConfigSource::select(Some(""), Some(&property), &[]).unwrap();
        assert_eq!(source, ConfigSource::Explicit(Vec::new()));
    }

    #[test]
    fn test_property_string_is_serialized() {
        let property = json!("[]");
        let source = ConfigSource::select(None, Some(&property), &[]).unwrap();
        assert_eq!(source.origin(), ConfigOrigin::Property);
        assert!(matches!(source, ConfigSource::Serialized { .. }));
    }

    #[test]
    fn test_property_wrong_shape() {
        let property = json!({ "src": "a.png" });
        let err = ConfigSource::select(None, Some(&property), &[]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WrongShape {
                origin: ConfigOrigin::Property,
                found: "object",
                ..
            }
        ));
    }

    #[test]
    fn test_null_property_falls_through_to_children() {
        let children = vec![
            RawItem::new("img").with_attribute("src", "a.png"),
            RawItem::new("p"),
            RawItem::new("div").with_attribute("data-src", "b.png"),
        ];
        let source = ConfigSource::select(None, Some(&Value::Null), &children).unwrap();

        match source {
            ConfigSource::Structural(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].attribute("src"), Some("a.png"));
                assert_eq!(items[1].attribute("data-src"), Some("b.png"));
            }
            other => panic!("expected structural source, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_serialized_errors() {
        let err = parse_serialized(ConfigOrigin::Attribute, "{not json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSerialization { .. }));
        assert_eq!(err.raw(), "{not json");

        let err = parse_serialized(ConfigOrigin::Attribute, r#"{"src":"a.png"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::WrongShape { found: "object", .. }));

        let items = parse_serialized(ConfigOrigin::Attribute, "[1, 2]").unwrap();
        assert_eq!(items.len(), 2);
    }
}
