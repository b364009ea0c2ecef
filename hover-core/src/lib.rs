//! # Hover Core
//!
//! 浮动图片组件的配置解析核心。
//!
//! ## 架构概述
//!
//! `hover-core` 是纯逻辑核心，不依赖任何 IO、DOM 或日志框架。
//! 宿主（Renderer）在配置变化时调用解析器，拿到描述后自行创建元素：
//!
//! ```text
//! Host                               Core
//!   │                                  │
//!   │── (attribute, property, children) ─►│
//!   │                                  │ resolve()
//!   │◄── Vec<AnimationDescriptor> ──────│
//!   │◄── DiagnosticResult ──────────────│
//! ```
//!
//! ## 核心类型
//!
//! - [`AnimationDescriptor`]：单张图片的归一化动画参数
//! - [`ConfigSource`]：本轮使用的配置来源（按优先级选择，不合并）
//! - [`ConfigError`]：解析错误
//! - [`FloatStyle`]：描述对应的声明式样式
//!
//! ## 使用示例
//!
//! ```ignore
//! use hover_core::{parse_children, resolve_report, FloatStyle, StyleOptions};
//!
//! let children = parse_children(r#"<img src="cloud.png" data-direction="x">"#);
//! let report = resolve_report(element.attribute("images"), element.property(), &children);
//!
//! for diag in &report.diagnostics.diagnostics {
//!     eprintln!("{diag}");
//! }
//! for descriptor in &report.descriptors {
//!     let style = FloatStyle::from_descriptor(descriptor, &StyleOptions::default());
//!     host.append_image(descriptor.source.as_deref(), &style.to_css());
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`descriptor`]：描述、方向、运动向量和默认值
//! - [`source`]：配置来源与优先级
//! - [`normalize`]：单项归一化与数值转换
//! - [`resolver`]：解析入口
//! - [`markup`]：子元素标记读取
//! - [`style`]：CSS 声明生成
//! - [`diagnostic`]：诊断输出
//! - [`error`]：错误类型定义

pub mod descriptor;
pub mod diagnostic;
pub mod error;
pub mod markup;
pub mod normalize;
pub mod resolver;
pub mod source;
pub mod style;

// 重导出核心类型
pub use descriptor::{AnimationDescriptor, Direction, MotionVector, motion_vector};
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticResult};
pub use error::{ConfigError, ConfigResult};
pub use markup::parse_children;
pub use resolver::{Resolution, ResolveReport, resolve, resolve_report, resolve_source};
pub use source::{ConfigOrigin, ConfigSource, RawItem};
pub use style::{FloatStyle, StyleOptions, css_number, shadow_stylesheet};
