use crate::error::{PromptKitError, Result};
use std::env;

pub const DEBUG_ENV_VAR: &str = "PROMPTKIT_DEBUG";

/// 环境变量配置管理
pub struct EnvConfig;

impl EnvConfig {
    /// 解析 API Key
    ///
    /// 优先级：
    /// 1. 直接传入的 api_key（如果不以 `${}` 包裹）
    /// 2. `${VAR_NAME}` 格式时读取对应环境变量
    /// 3. 未传入或为空时读取 `default_env_var`
    ///
    /// 空字符串视为未设置。
    pub fn resolve_api_key(api_key: Option<&str>, default_env_var: &str) -> Option<String> {
        let resolved = match api_key {
            Some(key) if key.starts_with("${") && key.ends_with('}') && key.len() > 3 => {
                Self::get_env_optional(&key[2..key.len() - 1])
            }
            Some(key) if !key.is_empty() => Some(key.to_string()),
            _ => Self::get_env_optional(default_env_var),
        };
        resolved.filter(|key| !key.is_empty())
    }

    /// 从环境变量获取值，未设置时报错
    pub fn get_env(key: &str) -> Result<String> {
        env::var(key).map_err(|_| {
            PromptKitError::user(format!(
                "environment variable `{key}` is not set, set it in your shell or .env file"
            ))
        })
    }

    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key).ok()
    }

    /// 读取环境变量，未设置时使用默认值
    pub fn get_env_or(key: &str, default: &str) -> String {
        Self::get_env_optional(key).unwrap_or_else(|| default.to_string())
    }

    pub fn is_debug_mode() -> bool {
        env::var(DEBUG_ENV_VAR).is_ok()
    }
}
