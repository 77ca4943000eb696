use std::fmt::Display;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PromptKitError>;

#[derive(Debug, Error)]
pub enum PromptKitError {
    #[error("unsupported type for XML formatting: {0}")]
    UnsupportedType(String),
    #[error("{0}")]
    User(String),
    #[error("invalid JSON schema: {0}")]
    Schema(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("http error: {0}")]
    Http(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromptKitError {
    pub fn user(message: impl Into<String>) -> Self {
        PromptKitError::User(message.into())
    }
}

impl serde::ser::Error for PromptKitError {
    fn custom<T: Display>(msg: T) -> Self {
        PromptKitError::Serialization(msg.to_string())
    }
}

#[cfg(feature = "groq")]
impl From<reqwest::Error> for PromptKitError {
    fn from(error: reqwest::Error) -> Self {
        PromptKitError::Http(error.to_string())
    }
}

impl From<serde_json::Error> for PromptKitError {
    fn from(error: serde_json::Error) -> Self {
        PromptKitError::Serialization(error.to_string())
    }
}
