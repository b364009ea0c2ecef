//! # Style 模块
//!
//! 把描述映射为声明式的 CSS 动画属性。
//!
//! 每张图片只设置自身的自定义属性和动画时序，
//! 共享的关键帧在 [`shadow_stylesheet`] 中定义：
//!
//! ```text
//! 0%   translate3d(0, 0, z)
//! 50%  translate3d(float-x, float-y, z)
//! 100% translate3d(0, 0, z)
//! ```

use serde::{Deserialize, Serialize};

use crate::descriptor::{AnimationDescriptor, MotionVector};

/// 样式生成选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptions {
    /// 关键帧名称
    pub keyframes_name: String,
    /// 缓动函数
    pub easing: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            keyframes_name: "float-anim".to_string(),
            easing: "ease-in-out".to_string(),
        }
    }
}

/// 单张图片的浮动样式
#[derive(Debug, Clone, PartialEq)]
pub struct FloatStyle {
    pub motion: MotionVector,
    pub depth: f64,
    pub duration: f64,
    pub delay: f64,
    pub keyframes_name: String,
    pub easing: String,
}

impl FloatStyle {
    pub fn from_descriptor(descriptor: &AnimationDescriptor, options: &StyleOptions) -> Self {
        Self {
            motion: descriptor.motion(),
            depth: descriptor.depth,
            duration: descriptor.duration,
            delay: descriptor.delay,
            keyframes_name: options.keyframes_name.clone(),
            easing: options.easing.clone(),
        }
    }

    /// 按固定顺序输出 CSS 声明
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--float-x", format!("{}px", css_number(self.motion.x))),
            ("--float-y", format!("{}px", css_number(self.motion.y))),
            ("--z", format!("{}px", css_number(self.depth))),
            (
                "animation",
                format!(
                    "{} {}s {} infinite",
                    self.keyframes_name,
                    css_number(self.duration),
                    self.easing
                ),
            ),
            ("animation-delay", format!("{}s", css_number(self.delay))),
        ]
    }

    /// 内联 `style` 属性文本
    pub fn to_css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl std::fmt::Display for FloatStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// 格式化 CSS 数值：整数不带小数点，`-0` 输出为 `0`
pub fn css_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

/// 宿主样式表
///
/// 容器开启透视和 3D 变换，图片绝对定位铺满容器并执行浮动关键帧。
pub fn shadow_stylesheet(perspective_px: f64, keyframes_name: &str, blend_mode: &str) -> String {
    let perspective = css_number(perspective_px);
    format!(
        r#":host {{
  display: block;
  perspective: {perspective}px;
  width: 100%;
  height: 100%;
}}

.container {{
  position: relative;
  width: 100%;
  height: 100%;
  transform-style: preserve-3d;
}}

.hovering-img {{
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  object-fit: contain;
  will-change: transform;
  pointer-events: none;
  mix-blend-mode: {blend_mode};
}}

@keyframes {keyframes_name} {{
  0% {{ transform: translate3d(0, 0, var(--z, 0px)); }}
  50% {{ transform: translate3d(var(--float-x, 0px), var(--float-y, -12px), var(--z, 0px)); }}
  100% {{ transform: translate3d(0, 0, var(--z, 0px)); }}
}}
"#
    )
}
