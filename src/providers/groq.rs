use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::instrument;

use super::{strip_prefix_ignore_ascii_case, Provider};
use crate::config::EnvConfig;
use crate::error::{PromptKitError, Result};
use crate::llm::{cached_http_client, LlmClient, LlmRequest, LlmResponse};
use crate::message::ContentPart;
use crate::profiles::{
    deepseek_model_profile, google_model_profile, meta_model_profile, mistral_model_profile,
    moonshotai_model_profile, qwen_model_profile, ModelProfile,
};

pub const GROQ_PROVIDER_NAME: &str = "groq";
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const GROQ_BASE_URL_ENV: &str = "GROQ_BASE_URL";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";

const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// 根据模型名称前缀选择模型配置
///
/// Groq 托管多个家族的开源模型，名称前缀决定家族：
/// `llama` / `meta-llama/` → Meta，`gemma` → Google，`qwen`，`deepseek`，
/// `mistral`，`moonshotai/`。带组织前缀的名称会先去掉前缀。
pub fn groq_model_profile(model_name: &str) -> Option<ModelProfile> {
    let lower = model_name.to_ascii_lowercase();

    if lower.starts_with("llama") {
        return meta_model_profile(model_name);
    }
    if let Some(rest) = strip_prefix_ignore_ascii_case(model_name, "meta-llama/") {
        return meta_model_profile(rest);
    }
    if lower.starts_with("gemma") {
        return google_model_profile(model_name);
    }
    if lower.starts_with("qwen") {
        return qwen_model_profile(model_name);
    }
    if lower.starts_with("deepseek") {
        return deepseek_model_profile(model_name);
    }
    if lower.starts_with("mistral") {
        return mistral_model_profile(model_name);
    }
    if let Some(rest) = strip_prefix_ignore_ascii_case(model_name, "moonshotai/") {
        return moonshotai_model_profile(rest);
    }
    None
}

/// Groq OpenAI 兼容接口客户端
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    #[instrument(skip(self, request))]
    pub async fn chat_completion(&self, model: &str, request: &LlmRequest) -> Result<Value> {
        let response = self
            .http
            .post(self.chat_completions_url())
            .bearer_auth(&self.api_key)
            .json(&chat_completion_body(model, request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PromptKitError::Http(format!(
                "Groq request failed with status {status}: {body}"
            )));
        }

        Ok(response.json().await?)
    }
}

pub fn chat_completion_body(model: &str, request: &LlmRequest) -> Value {
    let mut messages = Vec::new();
    if let Some(system) = &request.system {
        messages.push(json!({
            "role": "system",
            "content": system
        }));
    }
    messages.push(json!({
        "role": "user",
        "content": request.user
    }));

    let mut body = json!({
        "model": model,
        "messages": messages,
        "temperature": request.temperature,
    });
    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }
    body
}

/// 解析 chat completion 响应
///
/// 正文按模型配置的思考标签原样拆分；`reasoning` 字段（parsed 推理格式）
/// 作为第一个思考片段。
pub fn parse_chat_completion(payload: Value, profile: &ModelProfile) -> Result<LlmResponse> {
    let message = &payload["choices"][0]["message"];
    let content = message["content"]
        .as_str()
        .ok_or_else(|| PromptKitError::Http("missing message content".to_string()))?
        .to_string();

    let mut parts = Vec::new();
    if let Some(reasoning) = message["reasoning"].as_str() {
        parts.push(ContentPart::thinking(reasoning));
    }
    parts.extend(profile.split_thinking(&content));

    Ok(LlmResponse {
        content,
        parts,
        metadata: Some(payload),
    })
}

#[derive(Default)]
pub struct GroqProviderBuilder {
    api_key: Option<String>,
    groq_client: Option<GroqClient>,
    http_client: Option<reqwest::Client>,
}

impl GroqProviderBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn groq_client(mut self, client: GroqClient) -> Self {
        self.groq_client = Some(client);
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<GroqProvider> {
        if let Some(client) = self.groq_client {
            if self.http_client.is_some() {
                return Err(PromptKitError::user(
                    "cannot provide both `groq_client` and `http_client`",
                ));
            }
            if self.api_key.is_some() {
                return Err(PromptKitError::user(
                    "cannot provide both `groq_client` and `api_key`",
                ));
            }
            return Ok(GroqProvider { client });
        }

        let api_key = EnvConfig::resolve_api_key(self.api_key.as_deref(), GROQ_API_KEY_ENV)
            .ok_or_else(|| {
                PromptKitError::user(format!(
                    "Set the `{GROQ_API_KEY_ENV}` environment variable or pass it via `GroqProvider::builder().api_key(...)` to use the Groq provider."
                ))
            })?;

        let http = match self.http_client {
            Some(http) => http,
            None => cached_http_client(GROQ_PROVIDER_NAME)?,
        };
        let base_url = GroqProvider::default_base_url();
        tracing::debug!(base_url = %base_url, "groq provider configured");

        Ok(GroqProvider {
            client: GroqClient::new(base_url, api_key, http),
        })
    }
}

pub struct GroqProvider {
    client: GroqClient,
}

impl GroqProvider {
    pub fn builder() -> GroqProviderBuilder {
        GroqProviderBuilder::default()
    }

    /// 只从环境变量读取配置
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// `GROQ_BASE_URL` 或默认地址
    pub fn default_base_url() -> String {
        EnvConfig::get_env_or(GROQ_BASE_URL_ENV, DEFAULT_GROQ_BASE_URL)
    }

    pub fn model(&self, model_name: impl Into<String>) -> GroqChatModel {
        let model_name = model_name.into();
        let profile = self.model_profile(&model_name).unwrap_or_default();
        GroqChatModel {
            client: self.client.clone(),
            model_name,
            profile,
        }
    }
}

impl Provider for GroqProvider {
    type Client = GroqClient;

    fn name(&self) -> &str {
        GROQ_PROVIDER_NAME
    }

    fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn client(&self) -> &GroqClient {
        &self.client
    }

    fn model_profile(&self, model_name: &str) -> Option<ModelProfile> {
        groq_model_profile(model_name)
    }
}

/// 绑定到具体模型的 Groq 客户端
#[derive(Clone)]
pub struct GroqChatModel {
    client: GroqClient,
    model_name: String,
    profile: ModelProfile,
}

impl GroqChatModel {
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }
}

#[async_trait]
impl LlmClient for GroqChatModel {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let payload = self
            .client
            .chat_completion(&self.model_name, &request)
            .await?;
        parse_chat_completion(payload, &self.profile)
    }
}
