use thiserror::Error;

#[derive(Error, Debug)]
pub enum AreaClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Import error: {message}")]
    ImportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Auth,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AreaClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) => ErrorCategory::Network,
            Self::Status { .. } | Self::Api { .. } => ErrorCategory::Server,
            Self::Unauthorized { .. } => ErrorCategory::Auth,
            Self::Serialization(_) | Self::Csv(_) | Self::ImportError { .. } => {
                ErrorCategory::Data
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 伺服器拒絕請求，通常修正輸入後重試即可
            ErrorCategory::Server => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Auth | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => {
                "請求逾時，請檢查網路或調高 server.timeout_seconds".to_string()
            }
            Self::Http(_) => "無法連線至伺服器，請確認 server.base_url 是否正確".to_string(),
            Self::Status { status, .. } if *status >= 500 => {
                "伺服器內部錯誤，請稍後再試".to_string()
            }
            Self::Status { .. } => "請確認請求路徑與伺服器版本是否相符".to_string(),
            Self::Unauthorized { .. } => "請更新 auth.token 或重新登入取得新的 token".to_string(),
            Self::Api { .. } => "請依伺服器回傳訊息修正資料後重試".to_string(),
            Self::Serialization(_) => "請確認輸入或回應的 JSON 格式".to_string(),
            Self::Csv(_) => "請確認 CSV 檔案包含 n,i,p,y 標頭".to_string(),
            Self::ImportError { .. } => "請確認匯入檔案的格式與副檔名 (.json / .csv)".to_string(),
            Self::Io(_) => "請確認檔案路徑存在且具有讀取權限".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "請檢查設定檔內容".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Api { message, .. } => format!("伺服器拒絕請求：{}", message),
            Self::Unauthorized { .. } => "身分驗證失敗，token 無效或已過期".to_string(),
            Self::Status { status, .. } => format!("伺服器回應異常 (HTTP {})", status),
            Self::Http(_) => "網路請求失敗".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AreaClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_low_severity() {
        let err = AreaClientError::Api {
            code: 7,
            message: "區域編碼已存在".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Server);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("區域編碼已存在"));
    }

    #[test]
    fn test_config_errors_share_category() {
        let missing = AreaClientError::MissingConfigError {
            field: "server.base_url".to_string(),
        };
        let invalid = AreaClientError::InvalidConfigValueError {
            field: "server.base_url".to_string(),
            value: "nope".to_string(),
            reason: "bad".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert_eq!(invalid.category(), ErrorCategory::Configuration);
        assert_eq!(missing.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AreaClientError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.to_string(), "IO error: missing");
    }
}
