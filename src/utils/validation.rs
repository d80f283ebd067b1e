use crate::utils::error::{AreaClientError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AreaClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AreaClientError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AreaClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AreaClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AreaClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// HTTP 標頭名稱只允許 token 字元
pub fn validate_header_name(field_name: &str, name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c));
    if !valid {
        return Err(AreaClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Invalid HTTP header name".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("server.base_url", "https://example.com/api").is_ok());
        assert!(validate_url("server.base_url", "http://127.0.0.1:8888").is_ok());
        assert!(validate_url("server.base_url", "").is_err());
        assert!(validate_url("server.base_url", "invalid-url").is_err());
        assert!(validate_url("server.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("server.timeout_seconds", 30, 1, 300).is_ok());
        assert!(validate_range("server.timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("server.timeout_seconds", 301, 1, 300).is_err());
    }

    #[test]
    fn test_validate_header_name() {
        assert!(validate_header_name("headers", "X-Request-Source").is_ok());
        assert!(validate_header_name("headers", "bad header").is_err());
        assert!(validate_header_name("headers", "").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("auth.token", "abc").is_ok());
        assert!(validate_non_empty_string("auth.token", "   ").is_err());
    }
}
