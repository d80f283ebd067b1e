use crate::utils::error::{AreaClientError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub auth: Option<AuthConfig>,
    pub headers: Option<HashMap<String, String>>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl ClientConfig {
    /// 只有 base URL 的最小配置
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                base_url: base_url.into(),
                timeout_seconds: None,
            },
            auth: None,
            headers: None,
            logging: None,
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AreaClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AREA_API_TOKEN})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AreaClientError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth.get_or_insert_with(AuthConfig::default).token = Some(token.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.auth.get_or_insert_with(AuthConfig::default).user_id = Some(user_id.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.server.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|a| a.token.as_deref())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|a| a.user_id.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("server.base_url", &self.server.base_url)?;

        if let Some(timeout) = self.server.timeout_seconds {
            validation::validate_range("server.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(token) = self.token() {
            validation::validate_non_empty_string("auth.token", token)?;
            // 未替換的 ${VAR} 代表環境變數沒有設定
            if token.starts_with("${") {
                return Err(AreaClientError::MissingConfigError {
                    field: format!("auth.token ({})", token),
                });
            }
        }

        if let Some(headers) = &self.headers {
            for name in headers.keys() {
                validation::validate_header_name("headers", name)?;
            }
        }

        Ok(())
    }
}
