//! 基于 quick-xml 的元素树输出
//!
//! 缩进布局：容器的每个子元素另起一行并多缩进一级，结束标签单独一行。
//! 叶子元素的文本与标签在同一行。

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{PromptKitError, Result};

use super::element::XmlElement;

pub fn write_element(element: &XmlElement, indent: Option<&str>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, element, indent, 0)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| PromptKitError::Serialization(e.to_string()))
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    element: &XmlElement,
    indent: Option<&str>,
    depth: usize,
) -> Result<()> {
    let tag = element.tag.as_str();
    let text = element.text.as_deref().unwrap_or("");

    // 空元素写成 `<tag />`
    if text.is_empty() && element.children.is_empty() {
        let empty = BytesStart::from_content(format!("{tag} "), tag.len());
        return write_event(writer, Event::Empty(empty));
    }

    write_event(writer, Event::Start(BytesStart::new(tag)))?;
    if !text.is_empty() {
        write_event(writer, Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    }
    for child in &element.children {
        if let Some(unit) = indent {
            write_whitespace(writer, unit, depth + 1)?;
        }
        write_node(writer, child, indent, depth + 1)?;
    }
    if let (Some(unit), false) = (indent, element.children.is_empty()) {
        write_whitespace(writer, unit, depth)?;
    }
    write_event(writer, Event::End(BytesEnd::new(tag)))
}

fn write_whitespace(writer: &mut Writer<Vec<u8>>, unit: &str, depth: usize) -> Result<()> {
    let whitespace = format!("\n{}", unit.repeat(depth));
    write_event(writer, Event::Text(BytesText::from_escaped(whitespace)))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| PromptKitError::Serialization(e.to_string()))
}
