//! # Host 层
//!
//! 浮动图片组件的宿主层实现，扮演渲染器的角色。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 自定义元素注册
//! - 元素生命周期（接入/离开文档、特性变化、属性赋值）
//! - 子树变更通知与重新渲染
//! - 将 `hover-core` 的描述转换为影子根标记
//! - 配置文件与日志
//!
//! Host 层不包含配置解析逻辑，只负责在合适的时机调用解析器并使用其结果。

pub mod cli;
pub mod config;
pub mod element;
pub mod error;
pub mod logging;
pub mod registry;
pub mod render;

pub use config::{HostConfig, LogConfig, StyleConfig};
pub use element::{HoveringImages, MutationRecord, OBSERVED_CHILD_ATTRIBUTES};
pub use error::{HostError, HostResult};
pub use registry::{ElementDefinition, ElementRegistry};
pub use render::{RenderedImage, shadow_root_html};
