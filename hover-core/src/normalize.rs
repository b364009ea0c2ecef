//! # Normalize 模块
//!
//! 单项归一化：把一条原始记录变成 [`AnimationDescriptor`]。
//!
//! ## 缺省规则
//!
//! - JSON 记录：字段缺失或为 `null` 视为缺省，`0` 保留
//! - 子元素：属性缺失或为空串视为缺省，`"0"` 保留
//!
//! ## 数值转换
//!
//! 接受有限的数字和可解析为有限数的字符串（允许首尾空白）。
//! 其余值（非数字文本、布尔、数组、对象、非有限数）以及负的幅度、
//! 非正的周期都按缺省处理，并记录一条 `ItemCoercionIgnored`。

use serde_json::Value;

use crate::descriptor::{AnimationDescriptor, Direction, defaults};
use crate::error::ConfigError;
use crate::source::RawItem;

/// 字段的原始形态
#[derive(Debug, Clone, Copy)]
enum Field<'a> {
    Absent,
    Number(f64),
    Text(&'a str),
    Other(&'a Value),
}

impl<'a> Field<'a> {
    fn from_json(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(v @ Value::Number(n)) => n.as_f64().map_or(Self::Other(v), Self::Number),
            Some(Value::String(s)) => Self::Text(s),
            Some(other) => Self::Other(other),
        }
    }

    fn from_attribute(value: Option<&'a str>) -> Self {
        match value {
            None | Some("") => Self::Absent,
            Some(s) => Self::Text(s),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Absent => "缺省".to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => format!("{s:?}"),
            Self::Other(v) => v.to_string(),
        }
    }
}

/// 数值字段的取值约束
#[derive(Debug, Clone, Copy)]
enum Range {
    Any,
    NonNegative,
    Positive,
}

impl Range {
    fn accepts(self, n: f64) -> bool {
        n.is_finite()
            && match self {
                Self::Any => true,
                Self::NonNegative => n >= 0.0,
                Self::Positive => n > 0.0,
            }
    }
}

/// 单项归一化上下文
struct ItemContext<'n> {
    index: usize,
    notes: &'n mut Vec<ConfigError>,
}

impl ItemContext<'_> {
    fn number(&mut self, name: &'static str, field: Field<'_>, range: Range, default: f64) -> f64 {
        let parsed = match field {
            Field::Absent => return default,
            Field::Number(n) => Some(n),
            Field::Text(s) => s.trim().parse::<f64>().ok(),
            Field::Other(_) => None,
        };

        match parsed {
            Some(n) if range.accepts(n) => n,
            _ => {
                self.notes.push(ConfigError::ItemCoercionIgnored {
                    index: self.index,
                    field: name,
                    raw: field.describe(),
                });
                default
            }
        }
    }
}

impl AnimationDescriptor {
    /// 归一化 JSON 列表中的第 `index` 项
    ///
    /// 非对象的项得到全部默认值的描述。
    pub fn normalize_value(index: usize, item: &Value, notes: &mut Vec<ConfigError>) -> Self {
        let get = |key: &str| item.as_object().and_then(|map| map.get(key));

        let source = match get("src") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let direction = match get("direction") {
            Some(Value::String(s)) => Direction::parse_lossy(s),
            _ => Direction::Y,
        };

        // `z` 优先，`depth` 为别名
        let depth_field = match get("z") {
            None | Some(Value::Null) => get("depth"),
            z => z,
        };

        let mut ctx = ItemContext { index, notes };
        Self {
            source,
            direction,
            strength: ctx.number(
                "strength",
                Field::from_json(get("strength")),
                Range::NonNegative,
                defaults::STRENGTH,
            ),
            depth: ctx.number(
                "z",
                Field::from_json(depth_field),
                Range::Any,
                defaults::depth(index),
            ),
            duration: ctx.number(
                "duration",
                Field::from_json(get("duration")),
                Range::Positive,
                defaults::duration(index),
            ),
            delay: ctx.number(
                "delay",
                Field::from_json(get("delay")),
                Range::Any,
                defaults::delay(index),
            ),
        }
    }

    /// 归一化第 `index` 个合格子元素
    pub fn normalize_raw(index: usize, item: &RawItem, notes: &mut Vec<ConfigError>) -> Self {
        let non_empty = |name: &str| item.attribute(name).filter(|s| !s.is_empty());

        let source = non_empty("src")
            .or_else(|| non_empty("data-src"))
            .map(str::to_string);
        let direction = non_empty("data-direction")
            .map(Direction::parse_lossy)
            .unwrap_or_default();
        let depth_attr = non_empty("data-z").or_else(|| non_empty("data-depth"));

        let mut ctx = ItemContext { index, notes };
        Self {
            source,
            direction,
            strength: ctx.number(
                "data-strength",
                Field::from_attribute(item.attribute("data-strength")),
                Range::NonNegative,
                defaults::STRENGTH,
            ),
            depth: ctx.number(
                "data-z",
                Field::from_attribute(depth_attr),
                Range::Any,
                defaults::depth(index),
            ),
            duration: ctx.number(
                "data-duration",
                Field::from_attribute(item.attribute("data-duration")),
                Range::Positive,
                defaults::duration(index),
            ),
            delay: ctx.number(
                "data-delay",
                Field::from_attribute(item.attribute("data-delay")),
                Range::Any,
                defaults::delay(index),
            ),
        }
    }
}
