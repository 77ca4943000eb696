//! 命令行辅助函数，供 `promptkit` 二进制使用

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{PromptKitError, Result};
use crate::format::{format_as_xml, FormatOptions, XmlValue};
use crate::message::split_content_into_text_and_thinking;
use crate::profiles::{
    amazon_model_profile, deepseek_model_profile, google_model_profile, meta_model_profile,
    mistral_model_profile, moonshotai_model_profile, qwen_model_profile, JsonSchema, ModelProfile,
};

/// 读取输入；`None` 或 `-` 表示标准输入
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path).map_err(|e| {
            PromptKitError::user(format!("failed to read `{}`: {e}", path.display()))
        }),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| PromptKitError::user(format!("failed to read stdin: {e}")))?;
            Ok(buffer)
        }
    }
}

pub fn split_to_json(content: &str) -> Result<String> {
    let parts = split_content_into_text_and_thinking(content);
    Ok(serde_json::to_string_pretty(&parts)?)
}

pub fn xml_from_json(input: &str, options: &FormatOptions) -> Result<String> {
    let value: Value = serde_json::from_str(input)?;
    format_as_xml(&XmlValue::from(value), options)
}

/// 按提供商或模型家族名称查找配置
pub fn resolve_profile(provider: &str, model: &str) -> Result<Option<ModelProfile>> {
    let profile = match provider.to_ascii_lowercase().as_str() {
        #[cfg(feature = "groq")]
        "groq" => crate::providers::groq_model_profile(model),
        "amazon" => amazon_model_profile(model),
        "meta" => meta_model_profile(model),
        "google" => google_model_profile(model),
        "qwen" => qwen_model_profile(model),
        "deepseek" => deepseek_model_profile(model),
        "mistral" => mistral_model_profile(model),
        "moonshotai" => moonshotai_model_profile(model),
        other => {
            return Err(PromptKitError::user(format!("unknown provider `{other}`")));
        }
    };
    Ok(profile)
}

/// 用模型配置的转换器处理 schema，未知模型使用默认配置
pub fn transform_schema_for_model(provider: &str, model: &str, input: &str) -> Result<JsonSchema> {
    let schema = match serde_json::from_str::<Value>(input)? {
        Value::Object(map) => map,
        other => {
            return Err(PromptKitError::Schema(format!(
                "expected a JSON object, got `{other}`"
            )));
        }
    };
    let profile = resolve_profile(provider, model)?.unwrap_or_default();
    tracing::debug!(
        provider,
        model,
        transformer = ?profile.json_schema_transformer,
        "transforming schema"
    );
    profile.transform_schema(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_outputs_tagged_parts() {
        let json = split_to_json("a<think>b</think>").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["part_kind"], "text");
        assert_eq!(value[1]["part_kind"], "thinking");
        assert_eq!(value[1]["content"], "b");
    }

    #[test]
    fn xml_from_json_object() {
        let options = FormatOptions::default().with_root_tag("user");
        let xml = xml_from_json(r#"{"name": "John", "height": 6}"#, &options).unwrap();
        assert_eq!(xml, "<user>\n  <name>John</name>\n  <height>6</height>\n</user>");
    }

    #[test]
    fn unknown_provider_is_user_error() {
        let err = resolve_profile("nope", "model").unwrap_err();
        assert!(matches!(err, PromptKitError::User(_)));
    }

    #[test]
    fn schema_must_be_object() {
        let err = transform_schema_for_model("meta", "llama", "[1]").unwrap_err();
        assert!(matches!(err, PromptKitError::Schema(_)));
    }
}
