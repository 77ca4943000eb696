pub mod client;
#[cfg(feature = "groq")]
pub mod http_client;
pub mod types;

pub use client::{DynLlmClient, LlmClient};
#[cfg(feature = "groq")]
pub use http_client::{build_http_client, cached_http_client};
pub use types::{LlmRequest, LlmResponse};
