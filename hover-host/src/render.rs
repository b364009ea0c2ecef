//! # Render 模块
//!
//! 把描述转换为影子根中的标记。每轮渲染都从头生成，不做增量更新。

use hover_core::{AnimationDescriptor, FloatStyle, StyleOptions, shadow_stylesheet};

use crate::config::HostConfig;

/// 已渲染的浮动图片
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    /// 生成该图片的描述
    pub descriptor: AnimationDescriptor,
    /// 内联样式
    pub style: FloatStyle,
}

impl RenderedImage {
    pub fn from_descriptor(descriptor: &AnimationDescriptor, options: &StyleOptions) -> Self {
        Self {
            descriptor: descriptor.clone(),
            style: FloatStyle::from_descriptor(descriptor, options),
        }
    }

    /// `<img>` 标记；没有图片地址时省略 `src`
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<img class="hovering-img""#);
        if let Some(src) = &self.descriptor.source {
            html.push_str(&format!(r#" src="{}""#, escape_attribute(src)));
        }
        html.push_str(&format!(
            r#" style="{}">"#,
            escape_attribute(&self.style.to_css())
        ));
        html
    }
}

/// 生成完整的影子根标记（样式表 + 容器 + 图片）
pub fn shadow_root_html(config: &HostConfig, images: &[RenderedImage]) -> String {
    let css = shadow_stylesheet(
        config.style.perspective_px,
        &config.style.keyframes_name,
        &config.style.blend_mode,
    );

    let mut html = format!("<style>\n{css}</style>\n<div class=\"container\">\n");
    for image in images {
        html.push_str("  ");
        html.push_str(&image.to_html());
        html.push('\n');
    }
    html.push_str("</div>\n");
    html
}

/// 转义属性值中的特殊字符
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use hover_core::Direction;

    #[test]
    fn test_image_html() {
        let mut descriptor = AnimationDescriptor::with_defaults(0);
        descriptor.source = Some("a\".png".to_string());
        descriptor.direction = Direction::X;
        descriptor.strength = 10.0;

        let image = RenderedImage::from_descriptor(&descriptor, &StyleOptions::default());
        let html = image.to_html();

        assert!(html.starts_with(r#"<img class="hovering-img" src="a&quot;.png""#));
        assert!(html.contains("--float-x: 10px"));
        assert!(html.ends_with("animation-delay: 0s\">"));
    }

    #[test]
    fn test_image_without_source() {
        let image = RenderedImage::from_descriptor(
            &AnimationDescriptor::with_defaults(1),
            &StyleOptions::default(),
        );
        assert!(!image.to_html().contains("src="));
    }

    #[test]
    fn test_shadow_root_html() {
        let config = HostConfig::default();
        let images = vec![
            RenderedImage::from_descriptor(
                &AnimationDescriptor::with_defaults(0),
                &config.style_options(),
            ),
            RenderedImage::from_descriptor(
                &AnimationDescriptor::with_defaults(1),
                &config.style_options(),
            ),
        ];

        let html = shadow_root_html(&config, &images);
        assert!(html.starts_with("<style>\n:host {"));
        assert!(html.contains("<div class=\"container\">"));
        assert_eq!(html.matches("<img class=\"hovering-img\"").count(), 2);
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a&b<c>\"d\""), "a&amp;b&lt;c&gt;&quot;d&quot;");
        assert_eq!(escape_attribute("plain"), "plain");
    }
}
