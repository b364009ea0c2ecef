//! # Element 模块
//!
//! 单个浮动图片元素实例的生命周期。
//!
//! ## 重新渲染的触发条件
//!
//! - 观察的特性（默认 `images`）值发生变化
//! - 通过 [`HoveringImages::set_images`] 赋值属性
//! - 连接状态下的子元素变更：插入、删除，或下列属性变化
//!   （见 [`OBSERVED_CHILD_ATTRIBUTES`]）
//!
//! 每次渲染都完整调用一次解析器，不缓存上一轮结果。
//! 所有入口都需要 `&mut self`，同一实例上的渲染天然串行。

use std::collections::BTreeMap;
use std::sync::Arc;

use hover_core::{DiagnosticLevel, DiagnosticResult, RawItem, parse_children, resolve_report};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::render::{RenderedImage, shadow_root_html};

/// 会触发重新渲染的子元素属性
pub const OBSERVED_CHILD_ATTRIBUTES: &[&str] = &[
    "src",
    "data-src",
    "data-direction",
    "data-strength",
    "data-z",
    "data-depth",
    "data-duration",
    "data-delay",
];

/// 子树变更通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// 子元素插入或删除
    ChildList,
    /// 子元素属性变化
    Attributes { attribute_name: String },
}

impl MutationRecord {
    /// 是否需要重新渲染
    pub fn is_relevant(&self) -> bool {
        match self {
            Self::ChildList => true,
            Self::Attributes { attribute_name } => {
                OBSERVED_CHILD_ATTRIBUTES.contains(&attribute_name.as_str())
            }
        }
    }
}

/// 浮动图片元素
#[derive(Debug, Clone)]
pub struct HoveringImages {
    config: Arc<HostConfig>,
    /// 元素自身的特性
    attributes: BTreeMap<String, String>,
    /// 结构化属性值
    property: Option<Value>,
    /// 子元素（按文档顺序）
    children: Vec<RawItem>,
    observing: bool,
    images: Vec<RenderedImage>,
    diagnostics: DiagnosticResult,
    render_count: u64,
}

impl HoveringImages {
    pub fn new(config: Arc<HostConfig>) -> Self {
        Self {
            config,
            attributes: BTreeMap::new(),
            property: None,
            children: Vec::new(),
            observing: false,
            images: Vec::new(),
            diagnostics: DiagnosticResult::new(),
            render_count: 0,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    //=========================================================================
    // 生命周期
    //=========================================================================

    /// 元素接入文档：渲染并开始观察子树
    pub fn connected(&mut self) {
        self.render();
        self.observing = true;
    }

    /// 元素离开文档：停止观察
    pub fn disconnected(&mut self) {
        self.observing = false;
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    //=========================================================================
    // 特性与属性
    //=========================================================================

    /// 读取特性（特性名不区分大小写，下同）
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.attributes.get(&name).map(String::as_str)
    }

    /// 设置特性，返回是否触发了渲染
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let old = self.attributes.insert(name.to_ascii_lowercase(), value.clone());
        self.attribute_changed(name, old.as_deref(), Some(&value))
    }

    /// 移除特性，返回是否触发了渲染
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let old = self.attributes.remove(&name.to_ascii_lowercase());
        self.attribute_changed(name, old.as_deref(), None)
    }

    /// 特性变化回调：仅观察的特性且值确有变化时渲染
    pub fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) -> bool {
        if !name.eq_ignore_ascii_case(&self.config.observed_attribute) || old == new {
            return false;
        }
        self.render();
        true
    }

    /// 赋值结构化属性（数组或 JSON 字符串），`null` 表示清除
    pub fn set_images(&mut self, value: Value) {
        self.property = match value {
            Value::Null => None,
            other => Some(other),
        };
        self.render();
    }

    pub fn images(&self) -> Option<&Value> {
        self.property.as_ref()
    }

    //=========================================================================
    // 子元素
    //=========================================================================

    pub fn children(&self) -> &[RawItem] {
        &self.children
    }

    /// 用标记片段替换全部子元素
    pub fn set_children_markup(&mut self, markup: &str) {
        self.children = parse_children(markup);
        self.notify(&MutationRecord::ChildList);
    }

    pub fn append_child(&mut self, item: RawItem) {
        self.children.push(item);
        self.notify(&MutationRecord::ChildList);
    }

    pub fn remove_child(&mut self, index: usize) -> HostResult<RawItem> {
        if index >= self.children.len() {
            return Err(HostError::ChildOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        let removed = self.children.remove(index);
        self.notify(&MutationRecord::ChildList);
        Ok(removed)
    }

    pub fn set_child_attribute(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<String>,
    ) -> HostResult<()> {
        let len = self.children.len();
        let child = self
            .children
            .get_mut(index)
            .ok_or(HostError::ChildOutOfRange { index, len })?;
        child.attributes.insert(name.to_ascii_lowercase(), value.into());
        self.notify(&MutationRecord::Attributes {
            attribute_name: name.to_ascii_lowercase(),
        });
        Ok(())
    }

    /// 投递子树变更通知，返回是否触发了渲染
    ///
    /// 未连接（未观察）时忽略通知。
    pub fn notify(&mut self, record: &MutationRecord) -> bool {
        if !self.observing || !record.is_relevant() {
            return false;
        }
        self.render();
        true
    }

    //=========================================================================
    // 渲染
    //=========================================================================

    /// 重新解析配置并替换全部图片
    pub fn render(&mut self) -> &[RenderedImage] {
        let attribute = self.attribute(&self.config.observed_attribute);
        let report = resolve_report(attribute, self.property.as_ref(), &self.children);

        for diag in &report.diagnostics.diagnostics {
            let detail = diag.detail.as_deref().unwrap_or_default();
            match diag.level {
                DiagnosticLevel::Error => {
                    error!(origin = %diag.origin, raw = %detail, "{}", diag.message)
                }
                DiagnosticLevel::Warn => {
                    warn!(origin = %diag.origin, index = ?diag.index, "{}", diag.message)
                }
            }
        }

        let options = self.config.style_options();
        self.images = report
            .descriptors
            .iter()
            .map(|descriptor| RenderedImage::from_descriptor(descriptor, &options))
            .collect();
        self.diagnostics = report.diagnostics;
        self.render_count += 1;

        debug!(
            tag = %self.config.tag_name,
            origin = %report.origin,
            count = self.images.len(),
            "浮动图片已重新渲染"
        );

        &self.images
    }

    /// 最近一次渲染的图片
    pub fn rendered(&self) -> &[RenderedImage] {
        &self.images
    }

    /// 最近一次渲染的诊断
    pub fn diagnostics(&self) -> &DiagnosticResult {
        &self.diagnostics
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// 当前影子根标记
    pub fn shadow_html(&self) -> String {
        shadow_root_html(&self.config, &self.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element() -> HoveringImages {
        HoveringImages::new(Arc::new(HostConfig::default()))
    }

    #[test]
    fn test_mutation_relevance() {
        assert!(MutationRecord::ChildList.is_relevant());
        assert!(
            MutationRecord::Attributes {
                attribute_name: "data-strength".to_string()
            }
            .is_relevant()
        );
        assert!(
            !MutationRecord::Attributes {
                attribute_name: "alt".to_string()
            }
            .is_relevant()
        );
    }

    #[test]
    fn test_unchanged_attribute_does_not_render() {
        let mut el = element();
        assert!(el.set_attribute("images", "[]"));
        assert_eq!(el.render_count(), 1);

        assert!(!el.set_attribute("images", "[]"));
        assert!(!el.set_attribute("title", "x"));
        assert_eq!(el.render_count(), 1);
    }

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let mut el = element();
        assert!(el.set_attribute("IMAGES", r#"[{"src":"a.png"}]"#));
        assert_eq!(el.rendered().len(), 1);
        assert_eq!(el.attribute("images"), Some(r#"[{"src":"a.png"}]"#));

        // 不同大小写视为同一特性，值未变不重新渲染
        assert!(!el.set_attribute("Images", r#"[{"src":"a.png"}]"#));
        assert_eq!(el.render_count(), 1);

        assert!(el.remove_attribute("iMaGeS"));
        assert!(el.attribute("IMAGES").is_none());
        assert!(el.rendered().is_empty());
    }

    #[test]
    fn test_mutations_ignored_while_disconnected() {
        let mut el = element();
        el.append_child(RawItem::new("img").with_attribute("src", "a.png"));
        assert_eq!(el.render_count(), 0);

        el.connected();
        assert_eq!(el.rendered().len(), 1);

        el.disconnected();
        el.append_child(RawItem::new("img").with_attribute("src", "b.png"));
        assert_eq!(el.rendered().len(), 1);
    }

    #[test]
    fn test_property_clear_with_null() {
        let mut el = element();
        el.set_images(json!([{ "src": "a.png" }]));
        assert_eq!(el.rendered().len(), 1);

        el.set_images(Value::Null);
        assert!(el.images().is_none());
        assert!(el.rendered().is_empty());
    }

    #[test]
    fn test_child_out_of_range() {
        let mut el = element();
        assert_eq!(
            el.remove_child(0),
            Err(HostError::ChildOutOfRange { index: 0, len: 0 })
        );
        assert!(el.set_child_attribute(3, "src", "a.png").is_err());
    }
}
