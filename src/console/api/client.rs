use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::app_config::env::env_or_default;
use crate::error::{AppError, AppResult};

/// 后端 API 的固定版本前缀
pub const API_PREFIX: &str = "/api/v1/observe";

/// 控制台后端客户端
///
/// 单一请求原语：固定鉴权头 + JSON 协商，把所有失败归一化为 AppError。
/// 本层不做重试，重试策略属于轮询与派发层。
pub struct ConsoleClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ConsoleClient {
    pub fn new(base_url: String, api_token: String) -> Self {
        ConsoleClient {
            client: Client::new(),
            base_url,
            api_token,
        }
    }

    /// 从环境变量构建：CONSOLE_BASE_URL、CONSOLE_API_TOKEN
    pub fn from_env() -> AppResult<Self> {
        let base_url = env_or_default("CONSOLE_BASE_URL", "http://127.0.0.1:8000");
        let api_token = std::env::var("CONSOLE_API_TOKEN")
            .map_err(|_| AppError::Config("CONSOLE_API_TOKEN is not set".to_string()))?;
        Ok(Self::new(base_url, api_token))
    }

    pub(crate) async fn send_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> AppResult<T> {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);

        let mut request_builder = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request_builder = request_builder.json(&body);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status_code = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        debug!("path:{}, status:{}", path, status_code);

        if status_code.is_success() {
            serde_json::from_str(&response_body).map_err(|e| AppError::Server {
                status: status_code.as_u16(),
                message: format!("invalid response body: {}", e),
            })
        } else {
            Err(AppError::Server {
                status: status_code.as_u16(),
                message: normalize_error_body(&response_body, status_code),
            })
        }
    }
}

/// 归一化非 2xx 响应体
///
/// 接受扁平的 {"detail": "..."} 或嵌套的 {"detail": {"message": "..."}}，
/// 两者都没有时回退到 HTTP 状态文本。合法 JSON 错误体绝不作为解析失败抛出。
pub(crate) fn normalize_error_body(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail") {
            if let Some(s) = detail.as_str() {
                return s.to_string();
            }
            if let Some(msg) = detail.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_detail_string() {
        let body = r#"{"detail":"Send confirm=true to stop a strategy permanently."}"#;
        assert_eq!(
            normalize_error_body(body, StatusCode::BAD_REQUEST),
            "Send confirm=true to stop a strategy permanently."
        );
    }

    #[test]
    fn test_nested_detail_message() {
        let body = r#"{"detail":{"code":"KILL_SWITCH_ACTIVE","message":"Cannot resume strategy while global kill switch is active."}}"#;
        assert_eq!(
            normalize_error_body(body, StatusCode::CONFLICT),
            "Cannot resume strategy while global kill switch is active."
        );
    }

    #[test]
    fn test_fallback_to_status_text() {
        assert_eq!(
            normalize_error_body("<html>oops</html>", StatusCode::BAD_GATEWAY),
            "Bad Gateway"
        );
        assert_eq!(
            normalize_error_body(r#"{"other":1}"#, StatusCode::INTERNAL_SERVER_ERROR),
            "Internal Server Error"
        );
    }
}
