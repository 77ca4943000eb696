//! 对象到 XML 的格式化
//!
//! LLM 通常更容易读懂 XML 形式的半结构化数据（例如示例），这里把任意值
//! 转换为 XML 文本。
//!
//! ```
//! use promptkit::format::{format_as_xml, FormatOptions, XmlValue};
//!
//! let user = XmlValue::mapping([("name", XmlValue::from("John")), ("height", XmlValue::from(6))]);
//! let xml = format_as_xml(&user, &FormatOptions::default().with_root_tag("user")).unwrap();
//! assert_eq!(xml, "<user>\n  <name>John</name>\n  <height>6</height>\n</user>");
//! ```

pub mod element;
pub mod ser;
pub mod value;
pub mod writer;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use element::{to_element, XmlElement};
pub use ser::to_xml_value;
pub use value::XmlValue;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    /// 外层标签，`None` 时省略
    #[serde(default)]
    pub root_tag: Option<String>,
    /// 序列元素及未命名值的标签，记录类型会用自己的名称覆盖
    #[serde(default = "default_item_tag")]
    pub item_tag: String,
    #[serde(default = "default_none_str")]
    pub none_str: String,
    /// 缩进单位，`None` 时输出紧凑格式
    #[serde(default = "default_indent")]
    pub indent: Option<String>,
}

fn default_item_tag() -> String {
    "item".to_string()
}

fn default_none_str() -> String {
    "null".to_string()
}

fn default_indent() -> Option<String> {
    Some("  ".to_string())
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            root_tag: None,
            item_tag: default_item_tag(),
            none_str: default_none_str(),
            indent: default_indent(),
        }
    }
}

impl FormatOptions {
    pub fn with_root_tag(mut self, root_tag: impl Into<String>) -> Self {
        self.root_tag = Some(root_tag.into());
        self
    }

    pub fn with_item_tag(mut self, item_tag: impl Into<String>) -> Self {
        self.item_tag = item_tag.into();
        self
    }

    pub fn with_none_str(mut self, none_str: impl Into<String>) -> Self {
        self.none_str = none_str.into();
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    pub fn without_indent(mut self) -> Self {
        self.indent = None;
        self
    }
}

/// 将值格式化为 XML
///
/// 没有 `root_tag` 且根节点是容器时，不生成外层标签，而是把每个子元素
/// 分别输出后拼接（有缩进时用换行分隔），这样一次调用可以得到多个顶层片段。
pub fn format_as_xml(value: &XmlValue, options: &FormatOptions) -> Result<String> {
    let root = to_element(value, options.root_tag.as_deref(), options)?;
    let indent = options.indent.as_deref();

    if options.root_tag.is_none() && root.is_container() {
        let separator = if indent.is_some() { "\n" } else { "" };
        let fragments = root
            .children
            .iter()
            .map(|child| writer::write_element(child, indent))
            .collect::<Result<Vec<_>>>()?;
        Ok(fragments.join(separator))
    } else {
        writer::write_element(&root, indent)
    }
}

/// 先通过 serde 转换为 [`XmlValue`]，再格式化
pub fn format_serializable_as_xml<T>(value: &T, options: &FormatOptions) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let value = to_xml_value(value)?;
    format_as_xml(&value, options)
}
