//! 模型能力配置
//!
//! 每个模型家族对应一个不可变的 [`ModelProfile`]，描述该模型 API 支持的
//! 结构化输出能力，以及可选的 JSON Schema 转换器。

pub mod families;
pub mod google;
pub mod json_schema;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::{split_content_with_tags, ContentPart, END_THINK_TAG, START_THINK_TAG};

pub use families::{
    amazon_model_profile, deepseek_model_profile, meta_model_profile, mistral_model_profile,
    moonshotai_model_profile, qwen_model_profile,
};
pub use google::{google_model_profile, GoogleSchemaRewrite};
pub use json_schema::{InlineDefsRewrite, JsonSchema, JsonSchemaWalker, SchemaRewrite};

pub const DEFAULT_PROMPTED_OUTPUT_TEMPLATE: &str = "Always respond with a JSON object that's compatible with this schema:\n\n{schema}\n\nDon't include any text or Markdown fencing before or after.\n";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StructuredOutputMode {
    Tool,
    Native,
    Prompted,
}

/// 可选的 JSON Schema 转换器
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JsonSchemaTransformerKind {
    /// 尽可能内联 `$defs`
    InlineDefs,
    /// Gemini 只支持 OpenAPI 3.0.3 的子集
    Google,
}

impl JsonSchemaTransformerKind {
    pub fn transform(&self, schema: &JsonSchema) -> Result<JsonSchema> {
        match self {
            JsonSchemaTransformerKind::InlineDefs => JsonSchemaWalker::new(&InlineDefsRewrite)
                .prefer_inlined_defs(true)
                .walk(schema),
            JsonSchemaTransformerKind::Google => {
                let rewrite = GoogleSchemaRewrite::new(schema);
                JsonSchemaWalker::new(&rewrite)
                    .prefer_inlined_defs(true)
                    .simplify_nullable_unions(true)
                    .walk(schema)
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelProfile {
    pub supports_tools: bool,
    pub supports_json_schema_output: bool,
    pub supports_json_object_output: bool,
    pub default_structured_output_mode: StructuredOutputMode,
    pub prompted_output_template: String,
    #[serde(default)]
    pub json_schema_transformer: Option<JsonSchemaTransformerKind>,
    pub thinking_tags: (String, String),
    /// 流式输出时忽略开头的空白（部分模型会先输出空白再输出思考标签）
    pub ignore_streamed_leading_whitespace: bool,
}

impl Default for ModelProfile {
    fn default() -> Self {
        Self {
            supports_tools: true,
            supports_json_schema_output: false,
            supports_json_object_output: false,
            default_structured_output_mode: StructuredOutputMode::Tool,
            prompted_output_template: DEFAULT_PROMPTED_OUTPUT_TEMPLATE.to_string(),
            json_schema_transformer: None,
            thinking_tags: (START_THINK_TAG.to_string(), END_THINK_TAG.to_string()),
            ignore_streamed_leading_whitespace: false,
        }
    }
}

impl ModelProfile {
    pub fn with_json_schema_transformer(mut self, transformer: JsonSchemaTransformerKind) -> Self {
        self.json_schema_transformer = Some(transformer);
        self
    }

    /// 应用转换器；没有转换器时原样返回
    pub fn transform_schema(&self, schema: &JsonSchema) -> Result<JsonSchema> {
        match &self.json_schema_transformer {
            Some(transformer) => transformer.transform(schema),
            None => Ok(schema.clone()),
        }
    }

    pub fn split_thinking(&self, content: &str) -> Vec<ContentPart> {
        let (start, end) = &self.thinking_tags;
        split_content_with_tags(content, (start.as_str(), end.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_profile() {
        let profile = ModelProfile::default();
        assert!(profile.supports_tools);
        assert!(!profile.supports_json_schema_output);
        assert_eq!(profile.thinking_tags.0, "<think>");
        assert!(profile.prompted_output_template.contains("{schema}"));
    }

    #[test]
    fn transform_without_hook_is_identity() {
        let schema = json!({"type": "object", "title": "Keep"});
        let schema = schema.as_object().unwrap();
        assert_eq!(&ModelProfile::default().transform_schema(schema).unwrap(), schema);
    }

    #[test]
    fn split_uses_profile_tags() {
        let mut profile = ModelProfile::default();
        profile.thinking_tags = ("<reason>".into(), "</reason>".into());
        let parts = profile.split_thinking("<reason>r</reason>t<think>x</think>");
        assert_eq!(
            parts,
            vec![ContentPart::thinking("r"), ContentPart::text("t<think>x</think>")]
        );
    }
}
