use crate::config::ClientConfig;
use crate::core::{ApiRequest, HttpMethod, Transport};
use crate::utils::error::{AreaClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

const TOKEN_HEADER: &str = "x-token";
const USER_ID_HEADER: &str = "x-user-id";
const NEW_TOKEN_HEADER: &str = "new-token";
const ERROR_BODY_LIMIT: usize = 200;

/// 伺服器統一的回應封包
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    msg: String,
}

/// 以 reqwest 實作的 Transport。
///
/// 負責組合 base URL、附加 `x-token` / `x-user-id` 標頭、
/// 拆解 `{code, data, msg}` 封包，並在伺服器回傳 `new-token` 時更新 token。
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
    user_id: Option<String>,
    headers: HashMap<String, String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: RwLock::new(config.token().map(str::to_string)),
            user_id: config.user_id().map(str::to_string),
            headers: config.headers.clone().unwrap_or_default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 目前使用中的 token (可能已被伺服器刷新)
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn refresh_token(&self, new_token: &str) {
        if let Ok(mut token) = self.token.write() {
            tracing::debug!("🔑 Token refreshed by server");
            *token = Some(new_token.to_string());
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

/// 讀取錯誤回應的內容；讀取失敗時記錄並以說明文字代替
async fn read_error_body(response: Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("⚠️ Failed to read error response body: {}", e);
            format!("<body unavailable: {}>", e)
        }
    }
}

/// 401 的訊息：封包 msg 非空時優先，否則使用原始內容
fn unauthorized_message(body: &str) -> String {
    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) if !envelope.msg.is_empty() => envelope.msg,
        _ => truncate_body(body),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request<R>(&self, request: ApiRequest) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let endpoint = self.endpoint(&request.url);
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), endpoint.as_str());

        if let Some(token) = self.token() {
            builder = builder.header(TOKEN_HEADER, token);
        }
        if let Some(user_id) = &self.user_id {
            builder = builder.header(USER_ID_HEADER, user_id);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }

        tracing::debug!("📡 {} {}", request.method, endpoint);
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} {} -> {}", request.method, endpoint, status);

        if let Some(new_token) = response
            .headers()
            .get(NEW_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            self.refresh_token(new_token);
        }

        if status == StatusCode::UNAUTHORIZED {
            let message = unauthorized_message(&read_error_body(response).await);
            tracing::warn!("🔒 {} {} rejected: {}", request.method, endpoint, message);
            return Err(AreaClientError::Unauthorized { message });
        }

        if !status.is_success() {
            let body = read_error_body(response).await;
            tracing::error!("❌ {} {} failed with status {}", request.method, endpoint, status);
            return Err(AreaClientError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        // 先取文字再解析：傳輸失敗歸 Http，格式不符歸 Serialization
        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                "❌ {} {} returned a non-envelope body: {}",
                request.method,
                endpoint,
                truncate_body(&body)
            );
            AreaClientError::Serialization(e)
        })?;
        if envelope.code != 0 {
            tracing::debug!("📡 {} {} -> code {}: {}", request.method, endpoint, envelope.code, envelope.msg);
            return Err(AreaClientError::Api {
                code: envelope.code,
                message: envelope.msg,
            });
        }

        Ok(serde_json::from_value(envelope.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new(&ClientConfig::new("http://localhost:8888/api/")).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8888/api");
        assert_eq!(
            transport.endpoint("/area/getAreaTree"),
            "http://localhost:8888/api/area/getAreaTree"
        );
    }

    #[test]
    fn test_token_refresh_replaces_token() {
        let transport =
            HttpTransport::new(&ClientConfig::new("http://localhost:8888").with_token("old")).unwrap();
        assert_eq!(transport.token().as_deref(), Some("old"));

        transport.refresh_token("new");
        assert_eq!(transport.token().as_deref(), Some("new"));
    }

    #[test]
    fn test_unauthorized_message_prefers_envelope_msg() {
        assert_eq!(
            unauthorized_message(r#"{"code":7,"data":{},"msg":"未登录或非法访问"}"#),
            "未登录或非法访问"
        );
        // msg 缺漏或為空時退回原始內容
        assert_eq!(
            unauthorized_message(r#"{"code":7,"data":{}}"#),
            r#"{"code":7,"data":{}}"#
        );
        assert_eq!(
            unauthorized_message(r#"{"code":7,"msg":""}"#),
            r#"{"code":7,"msg":""}"#
        );
        assert_eq!(unauthorized_message("token expired"), "token expired");
    }

    #[test]
    fn test_truncate_body_limits_chars() {
        let body = "區".repeat(500);
        assert_eq!(truncate_body(&body).chars().count(), ERROR_BODY_LIMIT);
        assert_eq!(truncate_body("short"), "short");
    }
}
