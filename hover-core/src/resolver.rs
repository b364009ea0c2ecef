//! # Config Resolver
//!
//! 将三种配置来源之一解析为有序的 [`AnimationDescriptor`] 序列。
//!
//! 这是配置 → 描述的**唯一转换入口**。来源选择、JSON 校验、
//! 默认值填充都在这里完成；解析是同步、纯函数、幂等的。

use serde_json::Value;

use crate::descriptor::AnimationDescriptor;
use crate::diagnostic::{Diagnostic, DiagnosticResult};
use crate::error::{ConfigError, ConfigResult};
use crate::source::{ConfigOrigin, ConfigSource, RawItem, parse_serialized};

/// 一轮成功解析的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// 实际使用的来源
    pub origin: ConfigOrigin,
    /// 按输入顺序排列的描述
    pub descriptors: Vec<AnimationDescriptor>,
    /// 被降级处理的字段（非致命）
    pub notes: Vec<ConfigError>,
}

/// 解析配置
///
/// # 参数
///
/// - `attribute`: `images` 特性的值，空串视为未设置
/// - `property`: `images` 属性值，`null` 视为未设置
/// - `children`: 子元素记录（按文档顺序，可包含不合格的元素）
///
/// # 返回
///
/// 成功时返回描述序列；JSON 无效或不是数组时返回错误，
/// 不会回退到优先级更低的来源。
pub fn resolve(
    attribute: Option<&str>,
    property: Option<&Value>,
    children: &[RawItem],
) -> ConfigResult<Resolution> {
    let source = ConfigSource::select(attribute, property, children)?;
    resolve_source(&source)
}

/// 解析已选定的来源
pub fn resolve_source(source: &ConfigSource) -> ConfigResult<Resolution> {
    let mut notes = Vec::new();

    let descriptors = match source {
        ConfigSource::Explicit(items) => normalize_values(items, &mut notes),
        ConfigSource::Serialized { origin, text } => {
            let items = parse_serialized(*origin, text)?;
            normalize_values(&items, &mut notes)
        }
        ConfigSource::Structural(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| AnimationDescriptor::normalize_raw(index, item, &mut notes))
            .collect(),
    };

    Ok(Resolution {
        origin: source.origin(),
        descriptors,
        notes,
    })
}

fn normalize_values(items: &[Value], notes: &mut Vec<ConfigError>) -> Vec<AnimationDescriptor> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| AnimationDescriptor::normalize_value(index, item, notes))
        .collect()
}

/// 带诊断的解析结果
///
/// 宿主使用的形式：错误不会抛出，只体现在 `diagnostics` 中。
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveReport {
    /// 实际使用的来源（选择来源失败时为出错的来源）
    pub origin: ConfigOrigin,
    /// 描述序列；出现致命错误时为空
    pub descriptors: Vec<AnimationDescriptor>,
    /// 诊断条目
    pub diagnostics: DiagnosticResult,
}

/// 解析配置，并把错误转换为诊断
///
/// 致命错误恰好产生一条 Error 级诊断，描述序列为空；
/// 每个被降级的字段产生一条 Warn 级诊断。
pub fn resolve_report(
    attribute: Option<&str>,
    property: Option<&Value>,
    children: &[RawItem],
) -> ResolveReport {
    let mut diagnostics = DiagnosticResult::new();

    match resolve(attribute, property, children) {
        Ok(resolution) => {
            for note in &resolution.notes {
                diagnostics.push(Diagnostic::from_error(note, resolution.origin));
            }
            ResolveReport {
                origin: resolution.origin,
                descriptors: resolution.descriptors,
                diagnostics,
            }
        }
        Err(error) => {
            let origin = error.origin().unwrap_or(ConfigOrigin::Children);
            diagnostics.push(Diagnostic::from_error(&error, origin));
            ResolveReport {
                origin,
                descriptors: Vec::new(),
                diagnostics,
            }
        }
    }
}
