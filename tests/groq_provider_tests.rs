#![cfg(feature = "groq")]

use std::sync::Mutex;

use promptkit::providers::groq::{parse_chat_completion, GROQ_API_KEY_ENV, GROQ_BASE_URL_ENV};
use promptkit::{
    ContentPart, GroqClient, GroqProvider, JsonSchemaTransformerKind, LlmClient, LlmRequest,
    PromptKitError, Provider,
};
use serde_json::json;

// 环境变量是进程级共享状态
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn missing_api_key_is_user_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::remove_var(GROQ_API_KEY_ENV);

    let err = GroqProvider::builder().build().err().unwrap();
    match err {
        PromptKitError::User(message) => assert!(message.contains("GROQ_API_KEY")),
        other => panic!("unexpected error: {other:?}"),
    }

    std::env::set_var(GROQ_API_KEY_ENV, "");
    assert!(GroqProvider::from_env().is_err());
    std::env::remove_var(GROQ_API_KEY_ENV);
}

#[test]
fn api_key_falls_back_to_env_and_base_url_is_configurable() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var(GROQ_API_KEY_ENV, "gsk-test");
    std::env::remove_var(GROQ_BASE_URL_ENV);

    let provider = GroqProvider::from_env().unwrap();
    assert_eq!(provider.name(), "groq");
    assert_eq!(provider.base_url(), "https://api.groq.com");

    std::env::set_var(GROQ_BASE_URL_ENV, "http://localhost:9999/");
    let provider = GroqProvider::builder().api_key("gsk-direct").build().unwrap();
    assert_eq!(provider.base_url(), "http://localhost:9999/");
    assert_eq!(
        provider.client().chat_completions_url(),
        "http://localhost:9999/openai/v1/chat/completions"
    );

    std::env::remove_var(GROQ_BASE_URL_ENV);
    std::env::remove_var(GROQ_API_KEY_ENV);
}

#[test]
fn groq_client_conflicts_with_other_arguments() {
    let client = GroqClient::new("http://localhost", "key", reqwest::Client::new());

    let err = GroqProvider::builder()
        .groq_client(client.clone())
        .http_client(reqwest::Client::new())
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, PromptKitError::User(_)));

    let err = GroqProvider::builder()
        .groq_client(client.clone())
        .api_key("key")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, PromptKitError::User(_)));

    let provider = GroqProvider::builder().groq_client(client).build().unwrap();
    assert_eq!(provider.base_url(), "http://localhost");
}

#[test]
fn model_uses_resolved_profile() {
    let client = GroqClient::new("http://localhost", "key", reqwest::Client::new());
    let provider = GroqProvider::builder().groq_client(client).build().unwrap();

    let gemma = provider.model("gemma2-9b-it");
    assert_eq!(gemma.model_name(), "gemma2-9b-it");
    assert_eq!(
        gemma.profile().json_schema_transformer,
        Some(JsonSchemaTransformerKind::Google)
    );

    let unknown = provider.model("whisper-large-v3");
    assert_eq!(unknown.profile().json_schema_transformer, None);
}

#[test]
fn response_parts_follow_thinking_tags() {
    let payload = json!({
        "id": "chatcmpl-1",
        "model": "qwen-qwq-32b",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "<think>add</think>4"},
        }],
        "usage": {"total_tokens": 12},
    });
    let profile = promptkit::providers::groq_model_profile("qwen-qwq-32b").unwrap();
    let response = parse_chat_completion(payload, &profile).unwrap();
    assert_eq!(
        response.parts,
        vec![ContentPart::thinking("add"), ContentPart::text("4")]
    );
    assert_eq!(response.metadata.unwrap()["usage"]["total_tokens"], 12);
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let client = GroqClient::new("http://127.0.0.1:9", "key", reqwest::Client::new());
    let provider = GroqProvider::builder().groq_client(client).build().unwrap();
    let model = provider.model("llama-3.1-8b-instant");

    let err = model.complete(LlmRequest::new("hi")).await.unwrap_err();
    assert!(matches!(err, PromptKitError::Http(_)));
}
