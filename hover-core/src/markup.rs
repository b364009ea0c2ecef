//! # Markup 模块
//!
//! 从 HTML 片段中读取顶层子元素（手写扫描，无正则依赖）。
//!
//! 只识别结构回退所需的最小子集：开始/结束标签、属性、注释、
//! 空元素和自闭合标签。文本内容直接跳过。

use crate::source::RawItem;

/// 不需要结束标签的 HTML 空元素
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// 解析 HTML 片段，按文档顺序返回顶层元素
///
/// 输入: `<img src="a.png" data-strength="0"><div data-src="b.png"></div>`
/// 输出: 两个 `RawItem`，标签分别为 `img` 和 `div`
///
/// 嵌套元素不会出现在结果中；未闭合的元素按出现位置计入。
pub fn parse_children(markup: &str) -> Vec<RawItem> {
    let mut items = Vec::new();
    // 尚未闭合的元素名，栈空即处于顶层
    let mut open: Vec<String> = Vec::new();
    let mut rest = markup;

    while let Some(lt) = rest.find('<') {
        rest = &rest[lt..];

        // 注释
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        // 结束标签
        if let Some(after) = rest.strip_prefix("</") {
            let (name, next) = match after.find('>') {
                Some(end) => (&after[..end], &after[end + 1..]),
                None => (after, ""),
            };
            close_element(&mut open, name);
            rest = next;
            continue;
        }

        // <!DOCTYPE> 等声明
        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = match rest.find('>') {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            continue;
        }

        let Some((tag, consumed)) = scan_start_tag(&rest[1..]) else {
            // 不是标签，例如文本中的 "a < b"
            rest = &rest[1..];
            continue;
        };
        rest = &rest[1 + consumed..];

        let opens_scope = !tag.self_closing && !VOID_ELEMENTS.contains(&tag.item.tag.as_str());
        let name = tag.item.tag.clone();
        if open.is_empty() {
            items.push(tag.item);
        }
        if opens_scope {
            open.push(name);
        }
    }

    items
}

/// 处理结束标签：弹出到同名的开始标签为止
///
/// 空元素的结束标签（如 `</img>`）和没有对应开始标签的结束标签都被忽略。
fn close_element(open: &mut Vec<String>, raw_name: &str) {
    let name = raw_name.trim().to_ascii_lowercase();
    if VOID_ELEMENTS.contains(&name.as_str()) {
        return;
    }
    if let Some(pos) = open.iter().rposition(|tag| *tag == name) {
        open.truncate(pos);
    }
}

/// 扫描出的开始标签
struct StartTag {
    item: RawItem,
    self_closing: bool,
}

/// 扫描开始标签（输入不含前导 `<`），返回标签与消耗的字节数
fn scan_start_tag(s: &str) -> Option<(StartTag, usize)> {
    let name_len = s
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(s.len());
    let name = &s[..name_len];
    if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut item = RawItem::new(name.to_ascii_lowercase());
    let mut pos = name_len;
    let mut self_closing = false;

    loop {
        let remaining = &s[pos..];
        let trimmed = remaining.trim_start();
        pos += remaining.len() - trimmed.len();

        if trimmed.is_empty() {
            // 标签未闭合，吞掉剩余内容
            return Some((StartTag { item, self_closing }, s.len()));
        }
        if let Some(after) = trimmed.strip_prefix("/>") {
            self_closing = true;
            pos += trimmed.len() - after.len();
            break;
        }
        if trimmed.starts_with('>') {
            pos += 1;
            break;
        }
        if trimmed.starts_with('/') {
            pos += 1;
            continue;
        }

        let (name, value, consumed) = scan_attribute(trimmed);
        pos += consumed.max(1);
        if let Some(name) = name {
            // 重复属性以第一次出现为准
            item.attributes
                .entry(name.to_ascii_lowercase())
                .or_insert_with(|| value.unwrap_or_default().to_string());
        }
    }

    Some((StartTag { item, self_closing }, pos))
}

/// 扫描单个属性
///
/// 支持 `name="v"`、`name='v'`、`name=v` 和无值的 `name`。
fn scan_attribute(s: &str) -> (Option<&str>, Option<&str>, usize) {
    let name_len = s
        .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
        .unwrap_or(s.len());
    let name = (name_len > 0).then(|| &s[..name_len]);

    let after_name = &s[name_len..];
    let after_ws = after_name.trim_start();
    let Some(after_eq) = after_ws.strip_prefix('=') else {
        return (name, None, name_len);
    };
    let value_part = after_eq.trim_start();
    let value_offset = s.len() - value_part.len();

    match value_part.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &value_part[1..];
            match inner.find(quote) {
                Some(end) => (name, Some(&inner[..end]), value_offset + end + 2),
                None => (name, Some(inner), s.len()),
            }
        }
        Some(_) => {
            let end = value_part
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(value_part.len());
            (name, Some(&value_part[..end]), value_offset + end)
        }
        None => (name, Some(""), s.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_img_children() {
        let items = parse_children(
            r#"<img src="a.png" data-strength="0">
<img src='b.png' data-direction=x />"#,
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tag, "img");
        assert_eq!(items[0].attribute("src"), Some("a.png"));
        assert_eq!(items[0].attribute("data-strength"), Some("0"));
        assert_eq!(items[1].attribute("src"), Some("b.png"));
        assert_eq!(items[1].attribute("data-direction"), Some("x"));
    }

    #[test]
    fn test_nested_elements_are_not_top_level() {
        let items = parse_children(
            r#"<div data-src="outer.png"><img src="inner.png"><span>text</span></div><img src="after.png">"#,
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tag, "div");
        assert_eq!(items[0].attribute("data-src"), Some("outer.png"));
        assert_eq!(items[1].attribute("src"), Some("after.png"));
    }

    #[test]
    fn test_void_closing_tag_keeps_nesting() {
        let items = parse_children(
            r#"<div data-src="outer.png"><img src="in1.png"></img><img src="in2.png"></div><img src="out.png">"#,
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tag, "div");
        assert_eq!(items[1].attribute("src"), Some("out.png"));
    }

    #[test]
    fn test_stray_and_unbalanced_closing_tags() {
        // 多余的结束标签不影响层级
        let items = parse_children(r#"</span><img src="a.png"></p><img src="b.png">"#);
        assert_eq!(items.len(), 2);

        // 未闭合的内层元素随外层一起关闭
        let items = parse_children(
            r#"<div><span><img src="inner.png"></DIV><img src="after.png">"#,
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].attribute("src"), Some("after.png"));
    }

    #[test]
    fn test_comments_and_text_are_skipped() {
        let items = parse_children(
            r#"hello <!-- <img src="hidden.png"> --> a < b <IMG SRC="upper.png" hidden>"#,
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tag, "img");
        assert_eq!(items[0].attribute("src"), Some("upper.png"));
        // 无值属性记为空串
        assert_eq!(items[0].attribute("hidden"), Some(""));
    }

    #[test]
    fn test_self_closing_custom_tag_does_not_open_scope() {
        let items = parse_children(r#"<x-item data-src="a.png"/><x-item data-src="b.png"/>"#);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].attribute("data-src"), Some("b.png"));
    }

    #[test]
    fn test_unterminated_markup() {
        let items = parse_children(r#"<img src="a.png" data-z="5"#);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].attribute("data-z"), Some("5"));

        assert!(parse_children("").is_empty());
        assert!(parse_children("<!-- never closed").is_empty());
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let items = parse_children(r#"<img src="first.png" src="second.png">"#);
        assert_eq!(items[0].attribute("src"), Some("first.png"));
    }
}
