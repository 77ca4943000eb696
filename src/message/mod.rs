pub mod thinking;

use serde::{Deserialize, Serialize};

pub use thinking::{
    split_content_into_text_and_thinking, split_content_with_tags, END_THINK_TAG,
    START_THINK_TAG,
};

/// 普通文本片段
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextPart {
    pub content: String,
}

/// 模型思考片段（`<think>` 标签内的内容）
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThinkingPart {
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "part_kind", rename_all = "snake_case")]
pub enum ContentPart {
    Text(TextPart),
    Thinking(ThinkingPart),
}

impl ContentPart {
    pub fn text(content: impl Into<String>) -> Self {
        ContentPart::Text(TextPart {
            content: content.into(),
        })
    }

    pub fn thinking(content: impl Into<String>) -> Self {
        ContentPart::Thinking(ThinkingPart {
            content: content.into(),
        })
    }

    pub fn content(&self) -> &str {
        match self {
            ContentPart::Text(part) => &part.content,
            ContentPart::Thinking(part) => &part.content,
        }
    }

    pub fn is_thinking(&self) -> bool {
        matches!(self, ContentPart::Thinking(_))
    }
}

/// 拼接所有文本片段，忽略思考片段
pub fn joined_text(parts: &[ContentPart]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_thinking())
        .map(ContentPart::content)
        .collect()
}
