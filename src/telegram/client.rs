//! getUpdates 拉取
//!
//! 单次同步 GET，不重试、不缓存。HTTP 层通过 [`HttpTransport`] 抽象，测试可替换。

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::types::{Update, UpdatesResponse};
use crate::error::FetchError;

/// Telegram Bot API 默认地址
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// 默认超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 传输层错误（连接、超时、读取 body）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

/// 最小 HTTP 抽象：GET 并返回 body 文本
pub trait HttpTransport {
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// 基于 reqwest blocking 的传输实现
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError(e.to_string()))?;

        // 不单独检查状态码：Telegram 拒绝请求时也返回 {ok:false} 的 JSON
        debug!(status = %response.status(), "getUpdates responded");

        response.text().map_err(|e| TransportError(e.to_string()))
    }
}

/// 拉取更新的来源（编排层依赖这个 trait）
pub trait UpdateSource {
    fn fetch_updates(&self, token: &str) -> Result<Vec<Update>, FetchError>;
}

/// Telegram getUpdates 客户端
pub struct UpdateFetcher {
    transport: Box<dyn HttpTransport>,
    api_base: String,
}

impl UpdateFetcher {
    pub fn new(transport: Box<dyn HttpTransport>, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// 使用 reqwest 传输创建
    pub fn with_reqwest(api_base: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self::new(Box::new(ReqwestTransport::new(timeout)?), api_base))
    }

    pub fn updates_url(&self, token: &str) -> String {
        format!("{}/bot{}/getUpdates", self.api_base, token)
    }
}

impl UpdateSource for UpdateFetcher {
    fn fetch_updates(&self, token: &str) -> Result<Vec<Update>, FetchError> {
        let url = self.updates_url(token);
        debug!(url = %redact(&url, token), "Fetching updates");

        let body = self
            .transport
            .get(&url)
            .map_err(|e| FetchError::Network(redact(&e.0, token)))?;

        let envelope: UpdatesResponse = serde_json::from_str(&body)?;
        if !envelope.ok {
            return Err(FetchError::Api {
                error_code: envelope.error_code,
                description: envelope.description,
            });
        }

        debug!(count = envelope.result.len(), "Fetched updates");
        Ok(envelope.result)
    }
}

/// 日志和错误信息中隐藏 token
fn redact(text: &str, token: &str) -> String {
    if token.is_empty() {
        text.to_string()
    } else {
        text.replace(token, "***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 固定返回值的假传输，记录请求 URL
    struct FakeTransport {
        response: Result<String, TransportError>,
        requests: Rc<RefCell<Vec<String>>>,
    }

    impl HttpTransport for FakeTransport {
        fn get(&self, url: &str) -> Result<String, TransportError> {
            self.requests.borrow_mut().push(url.to_string());
            self.response.clone()
        }
    }

    fn fetcher(response: Result<&str, &str>) -> (UpdateFetcher, Rc<RefCell<Vec<String>>>) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        let transport = FakeTransport {
            response: response
                .map(str::to_string)
                .map_err(|e| TransportError(e.to_string())),
            requests: Rc::clone(&requests),
        };
        (UpdateFetcher::new(Box::new(transport), DEFAULT_API_BASE), requests)
    }

    #[test]
    fn test_token_substituted_into_path() {
        let (fetcher, requests) = fetcher(Ok(r#"{"ok": true, "result": []}"#));
        fetcher.fetch_updates("123:abc").unwrap();
        assert_eq!(
            requests.borrow().as_slice(),
            ["https://api.telegram.org/bot123:abc/getUpdates"]
        );
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let fetcher = UpdateFetcher::new(
            Box::new(FakeTransport {
                response: Ok(r#"{"ok": true, "result": []}"#.to_string()),
                requests: Rc::new(RefCell::new(Vec::new())),
            }),
            "http://localhost:8081/",
        );
        assert_eq!(fetcher.updates_url("t"), "http://localhost:8081/bott/getUpdates");
    }

    #[test]
    fn test_success_preserves_order() {
        let (fetcher, _) = fetcher(Ok(
            r#"{"ok": true, "result": [{"update_id": 3}, {"update_id": 1}, {"update_id": 2}]}"#,
        ));
        let ids: Vec<i64> = fetcher
            .fetch_updates("t")
            .unwrap()
            .iter()
            .map(|u| u.update_id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_ok_false_is_api_error_even_with_result() {
        let (fetcher, _) = fetcher(Ok(
            r#"{"ok": false, "result": [{"update_id": 1}], "error_code": 401, "description": "Unauthorized"}"#,
        ));
        match fetcher.fetch_updates("bad") {
            Err(FetchError::Api { error_code, description }) => {
                assert_eq!(error_code, Some(401));
                assert_eq!(description.as_deref(), Some("Unauthorized"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let (fetcher, _) = fetcher(Ok("<html>502 Bad Gateway</html>"));
        assert!(matches!(fetcher.fetch_updates("t"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let (fetcher, _) = fetcher(Ok(r#"{"ok": "yes", "result": {}}"#));
        assert!(matches!(fetcher.fetch_updates("t"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_transport_failure_is_network_error_without_token() {
        let (fetcher, _) = fetcher(Err(
            "error sending request for url (https://api.telegram.org/botsecret/getUpdates)",
        ));
        match fetcher.fetch_updates("secret") {
            Err(FetchError::Network(msg)) => {
                assert!(!msg.contains("secret"));
                assert!(msg.contains("bot***"));
            }
            other => panic!("expected Network error, got {:?}", other),
        }
    }
}
