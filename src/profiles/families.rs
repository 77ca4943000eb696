use once_cell::sync::Lazy;

use super::{JsonSchemaTransformerKind, ModelProfile};

static INLINE_DEFS_PROFILE: Lazy<ModelProfile> = Lazy::new(|| {
    ModelProfile::default().with_json_schema_transformer(JsonSchemaTransformerKind::InlineDefs)
});

/// Amazon（Nova 等）模型
pub fn amazon_model_profile(_model_name: &str) -> Option<ModelProfile> {
    Some(INLINE_DEFS_PROFILE.clone())
}

/// Meta（Llama）模型
pub fn meta_model_profile(_model_name: &str) -> Option<ModelProfile> {
    Some(INLINE_DEFS_PROFILE.clone())
}

/// Qwen 模型
pub fn qwen_model_profile(_model_name: &str) -> Option<ModelProfile> {
    Some(INLINE_DEFS_PROFILE.clone())
}

/// DeepSeek 模型，R1 系列在流式输出开头会有空白
pub fn deepseek_model_profile(model_name: &str) -> Option<ModelProfile> {
    Some(ModelProfile {
        ignore_streamed_leading_whitespace: model_name.contains("r1"),
        ..ModelProfile::default()
    })
}

pub fn moonshotai_model_profile(_model_name: &str) -> Option<ModelProfile> {
    Some(ModelProfile {
        ignore_streamed_leading_whitespace: true,
        ..ModelProfile::default()
    })
}

/// Mistral 模型使用默认能力
pub fn mistral_model_profile(_model_name: &str) -> Option<ModelProfile> {
    None
}
