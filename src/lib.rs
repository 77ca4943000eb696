pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod llm;
pub mod message;
pub mod profiles;
pub mod providers;
pub mod utils;

pub use config::EnvConfig;
pub use error::{PromptKitError, Result};
pub use format::{
    format_as_xml, format_serializable_as_xml, to_xml_value, FormatOptions, XmlElement, XmlValue,
};
pub use llm::{DynLlmClient, LlmClient, LlmRequest, LlmResponse};
pub use message::{
    split_content_into_text_and_thinking, ContentPart, TextPart, ThinkingPart, END_THINK_TAG,
    START_THINK_TAG,
};
pub use profiles::{
    JsonSchema, JsonSchemaTransformerKind, ModelProfile, StructuredOutputMode,
    DEFAULT_PROMPTED_OUTPUT_TEMPLATE,
};
pub use providers::Provider;
#[cfg(feature = "groq")]
pub use providers::{GroqChatModel, GroqClient, GroqProvider, GroqProviderBuilder};
pub use utils::{logging, LoggingConfig};
