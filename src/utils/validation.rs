use crate::utils::error::{ProbeError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 探測工具實際會送出的 HTTP 方法
pub const SUPPORTED_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> ProbeError {
    ProbeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 簽章需要完整的 http(s) URL，並回傳解析結果
pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str.trim())
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Only http and https can be signed, got {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }
    if url.fragment().is_some() {
        return Err(invalid(field_name, url_str, "Fragments are not sent and cannot be signed"));
    }

    Ok(url)
}

/// secret 路徑必須指向檔案，而不是目錄
pub fn validate_secret_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.ends_with('/') || path.ends_with(std::path::MAIN_SEPARATOR) {
        return Err(invalid(field_name, path, "Path names a directory, expected a secret file"));
    }
    if Path::new(path).is_dir() {
        return Err(invalid(field_name, path, "Path is a directory, expected a secret file"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_http_method(field_name: &str, method: &str) -> Result<()> {
    let upper = method.to_ascii_uppercase();
    if SUPPORTED_METHODS.contains(&upper.as_str()) {
        return Ok(());
    }
    Err(ProbeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: method.to_string(),
        reason: format!(
            "Unsupported HTTP method. Supported methods: {}",
            SUPPORTED_METHODS.join(", ")
        ),
    })
}

/// 解析 `name=value` 形式的參數，值可以為空但名稱不行
pub fn validate_param_pair(field_name: &str, raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Expected name=value".to_string(),
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
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_returns_parsed_url() {
        let url = validate_url("url", "http://localhost:8008/job/12345").unwrap();
        assert_eq!(url.port(), Some(8008));
        assert_eq!(url.path(), "/job/12345");

        assert!(validate_url("url", "https://example.com").is_ok());
        assert!(validate_url("url", "").is_err());
        assert!(validate_url("url", "localhost:8008/job").is_err());
        assert!(validate_url("url", "ftp://example.com").is_err());
        assert!(validate_url("url", "http://localhost:8008/job#top").is_err());
    }

    #[test]
    fn test_validate_secret_path() {
        assert!(validate_secret_path("secret_file", "keys/8008/8080/rust-test-key").is_ok());
        assert!(validate_secret_path("secret_file", "").is_err());
        assert!(validate_secret_path("secret_file", "keys/8008/8080/").is_err());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_secret_path("secret_file", &dir.path().to_string_lossy()).is_err());
    }

    #[test]
    fn test_validate_http_method_is_case_insensitive() {
        assert!(validate_http_method("method", "get").is_ok());
        assert!(validate_http_method("method", "DELETE").is_ok());
        assert!(validate_http_method("method", "PATCH").is_err());
    }

    #[test]
    fn test_validate_param_pair() {
        assert_eq!(
            validate_param_pair("param", "strings=kill").unwrap(),
            ("strings".to_string(), "kill".to_string())
        );
        assert_eq!(
            validate_param_pair("param", "not=").unwrap(),
            ("not".to_string(), String::new())
        );
        assert_eq!(
            validate_param_pair("param", "q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(validate_param_pair("param", "novalue").is_err());
        assert!(validate_param_pair("param", "=orphan").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("timeout_seconds", 301u64, 1, 300).is_err());
    }
}
