use std::collections::HashMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::Result;

static CLIENTS: Lazy<Mutex<HashMap<String, reqwest::Client>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// 创建 HTTP 客户端
///
/// - 连接池：复用连接
/// - 超时：连接 10 秒，整体 600 秒
pub fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(600))
        .build()?;
    Ok(client)
}

/// 按提供商缓存的 HTTP 客户端，同一提供商的所有调用共享连接池
pub fn cached_http_client(provider: &str) -> Result<reqwest::Client> {
    let mut clients = CLIENTS.lock();
    if let Some(client) = clients.get(provider) {
        return Ok(client.clone());
    }

    tracing::debug!(provider, "creating cached http client");
    let client = build_http_client()?;
    clients.insert(provider.to_string(), client.clone());
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clients_are_cached_per_provider() {
        cached_http_client("cache-test-a").unwrap();
        cached_http_client("cache-test-a").unwrap();
        cached_http_client("cache-test-b").unwrap();

        let clients = CLIENTS.lock();
        assert!(clients.contains_key("cache-test-a"));
        assert!(clients.contains_key("cache-test-b"));
    }
}
