use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Failed to read consumer secret from '{path}': {source}")]
    SecretReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Signing error: {message}")]
    SigningError { message: String },

    /// `body` 只用於錯誤訊息，非 UTF-8 位元組以替代字元顯示
    #[error("Server responded with HTTP {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Key server {url} responded with HTTP {status}")]
    KeyServerError { url: String, status: u16 },

    #[error("Consumer secret from {source_name} is not valid UTF-8")]
    InvalidSecretEncoding { source_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Credentials,
    Network,
    Server,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 暫時性錯誤，重試可能成功
    Medium,
    /// 請求或配置錯誤
    High,
    /// 本機系統錯誤
    Critical,
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::ApiError(_) => ErrorCategory::Network,
            ProbeError::IoError(_) => ErrorCategory::Internal,
            ProbeError::SecretReadError { .. }
            | ProbeError::KeyServerError { .. }
            | ProbeError::InvalidSecretEncoding { .. } => ErrorCategory::Credentials,
            ProbeError::UrlError(_)
            | ProbeError::MissingConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ProbeError::SigningError { .. } => ErrorCategory::Internal,
            ProbeError::UnexpectedStatus { .. } => ErrorCategory::Server,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProbeError::ApiError(_) => ErrorSeverity::Medium,
            ProbeError::IoError(_) | ProbeError::SecretReadError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 依嚴重程度決定行程結束碼，任何錯誤都不會回傳 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProbeError::ApiError(e) if e.is_timeout() => {
                "The request timed out before the server answered".to_string()
            }
            ProbeError::ApiError(e) if e.is_connect() => {
                "Could not connect to the server".to_string()
            }
            ProbeError::SecretReadError { path, .. } => {
                format!("Could not read the consumer secret file '{}'", path)
            }
            ProbeError::KeyServerError { url, status } => {
                format!("The key server refused to hand out a secret ({}): HTTP {}", url, status)
            }
            ProbeError::UnexpectedStatus { status, body } if body.is_empty() => {
                format!("The server rejected the request with HTTP {}", status)
            }
            ProbeError::UnexpectedStatus { status, body } => {
                format!("The server rejected the request with HTTP {}: {}", status, body.trim())
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProbeError::ApiError(_) => "Check that the target server is running and reachable",
            ProbeError::IoError(_) => "Check file permissions and available disk space",
            ProbeError::SecretReadError { .. } => {
                "Generate a key for this consumer or point --secret-file at an existing one"
            }
            ProbeError::UrlError(_) => "Use an absolute http:// or https:// URL",
            ProbeError::MissingConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again"
            }
            ProbeError::KeyServerError { status: 404, .. } => {
                "The key server has no secret for this consumer key; generate one first"
            }
            ProbeError::KeyServerError { .. } => {
                "Check the key server URL and that the key server is running"
            }
            ProbeError::InvalidSecretEncoding { .. } => {
                "Store the consumer secret as plain UTF-8 text"
            }
            ProbeError::SigningError { .. } => "Check the consumer secret and access token",
            ProbeError::UnexpectedStatus { status: 401, .. } => {
                "The signature was rejected; verify the consumer key, secret and system clock"
            }
            ProbeError::UnexpectedStatus { .. } => "Inspect the server logs for this request",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;

/// 各執行檔共用的失敗出口：記錄日誌、在 stderr 說明並以對應結束碼離開
pub fn report_and_exit(e: &ProbeError) -> ! {
    tracing::error!(
        "❌ Probe failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            ProbeError::IoError(std::io::Error::other("disk")),
            ProbeError::SecretReadError {
                path: "keys/8008/8080/missing".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
            ProbeError::MissingConfigError {
                field: "url".to_string(),
            },
            ProbeError::SigningError {
                message: "bad key".to_string(),
            },
            ProbeError::UnexpectedStatus {
                status: 500,
                body: String::new(),
            },
        ];

        for error in errors {
            assert_ne!(error.exit_code(), 0, "{:?}", error);
        }
    }

    #[test]
    fn test_secret_read_error_is_critical_credentials_error() {
        let error = ProbeError::SecretReadError {
            path: "keys/8008/8080/rust-test-key".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert_eq!(error.category(), ErrorCategory::Credentials);
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert_eq!(error.exit_code(), 3);
        assert!(error
            .user_friendly_message()
            .contains("keys/8008/8080/rust-test-key"));
    }

    #[test]
    fn test_key_server_rejection_is_not_blamed_on_signature() {
        let error = ProbeError::KeyServerError {
            url: "http://localhost:8787/proxy/8000/key/unknown/".to_string(),
            status: 404,
        };

        assert_eq!(error.category(), ErrorCategory::Credentials);
        assert_eq!(error.exit_code(), 1);
        assert!(!error.recovery_suggestion().contains("signature"));
        assert!(error.user_friendly_message().contains("key server"));
    }

    #[test]
    fn test_unexpected_status_message_includes_body() {
        let error = ProbeError::UnexpectedStatus {
            status: 401,
            body: "Invalid signature\n".to_string(),
        };

        assert_eq!(error.category(), ErrorCategory::Server);
        assert_eq!(error.exit_code(), 1);
        assert_eq!(
            error.user_friendly_message(),
            "The server rejected the request with HTTP 401: Invalid signature"
        );
        assert!(error.recovery_suggestion().contains("signature"));
    }
}
