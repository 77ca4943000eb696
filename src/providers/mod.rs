//! LLM 提供商
//!
//! 提供商负责创建 API 客户端，并根据模型名称给出对应的 [`ModelProfile`]。

#[cfg(feature = "groq")]
pub mod groq;

use crate::profiles::ModelProfile;

#[cfg(feature = "groq")]
pub use groq::{groq_model_profile, GroqChatModel, GroqClient, GroqProvider, GroqProviderBuilder};

pub trait Provider {
    type Client;

    fn name(&self) -> &str;

    fn base_url(&self) -> &str;

    fn client(&self) -> &Self::Client;

    fn model_profile(&self, model_name: &str) -> Option<ModelProfile>;
}

/// 忽略 ASCII 大小写去除前缀
pub(crate) fn strip_prefix_ignore_ascii_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        name.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefix_is_case_insensitive() {
        assert_eq!(
            strip_prefix_ignore_ascii_case("Meta-Llama/Llama-4", "meta-llama/"),
            Some("Llama-4")
        );
        assert_eq!(strip_prefix_ignore_ascii_case("qwen", "qwen-qwq"), None);
        assert_eq!(strip_prefix_ignore_ascii_case("gemma2", "llama"), None);
    }
}
