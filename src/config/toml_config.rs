use crate::config::{default_secret_path, DEFAULT_KEYS_DIR, DEFAULT_METHOD};
use crate::domain::model::{OutputOptions, SecretLocation, SignatureTransport};
use crate::domain::ports::ConfigProvider;
use crate::oauth::AccessToken;
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub request: RequestConfig,
    pub credentials: CredentialsConfig,
    pub output: Option<OutputOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub url: String,
    pub method: Option<String>,
    /// `name=value` 字串，可重複同一個名稱
    pub params: Option<Vec<String>>,
    pub signature_in: Option<SignatureTransport>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub consumer_key: String,
    pub keys_dir: Option<String>,
    pub secret_file: Option<String>,
    pub key_server_url: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProbeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROBE_SECRET_FILE})，找不到的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProbeError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("request.url", &self.request.url)?;
        validation::validate_http_method("request.method", self.method())?;
        validation::validate_non_empty_string(
            "credentials.consumer_key",
            &self.credentials.consumer_key,
        )?;

        if self.credentials.secret_file.is_some() && self.credentials.key_server_url.is_some() {
            return Err(ProbeError::ConfigValidationError {
                field: "credentials".to_string(),
                message: "secret_file and key_server_url are mutually exclusive".to_string(),
            });
        }

        match self.secret_location() {
            SecretLocation::File(path) => {
                validation::validate_secret_path(
                    "credentials.secret_file",
                    &path.to_string_lossy(),
                )?;
            }
            SecretLocation::KeyServer(base_url) => {
                validation::validate_url("credentials.key_server_url", &base_url)?;
            }
        }

        self.params()?;

        if let Some(timeout) = self.request.timeout_seconds {
            validation::validate_range("request.timeout_seconds", timeout, 1, 300)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn url(&self) -> &str {
        &self.request.url
    }

    fn method(&self) -> &str {
        self.request.method.as_deref().unwrap_or(DEFAULT_METHOD)
    }

    fn consumer_key(&self) -> &str {
        &self.credentials.consumer_key
    }

    fn secret_location(&self) -> SecretLocation {
        if let Some(base_url) = &self.credentials.key_server_url {
            return SecretLocation::KeyServer(base_url.clone());
        }
        match &self.credentials.secret_file {
            Some(path) => SecretLocation::File(PathBuf::from(path)),
            None => SecretLocation::File(default_secret_path(
                self.credentials.keys_dir.as_deref().unwrap_or(DEFAULT_KEYS_DIR),
                &self.credentials.consumer_key,
            )),
        }
    }

    fn access_token(&self) -> AccessToken {
        AccessToken::new(
            self.credentials.access_token.clone().unwrap_or_default(),
            self.credentials.access_token_secret.clone().unwrap_or_default(),
        )
    }

    fn params(&self) -> Result<Vec<(String, String)>> {
        self.request
            .params
            .iter()
            .flatten()
            .map(|raw| validation::validate_param_pair("request.params", raw))
            .collect()
    }

    fn signature_transport(&self) -> SignatureTransport {
        self.request.signature_in.unwrap_or_default()
    }

    fn timeout(&self) -> Option<Duration> {
        self.request.timeout_seconds.map(Duration::from_secs)
    }

    fn output_options(&self) -> OutputOptions {
        self.output.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_toml_config() {
        let toml_content = r#"
[request]
url = "http://localhost:8008/job/12345"

[credentials]
consumer_key = "golang-test-key"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.method(), "GET");
        assert_eq!(
            config.secret_location(),
            SecretLocation::File(PathBuf::from("keys/8008/8080/golang-test-key"))
        );
        assert!(config.access_token().is_empty());
        assert_eq!(config.signature_transport(), SignatureTransport::Header);
        assert_eq!(config.output_options(), OutputOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[request]
url = "http://localhost:8000/job?do=query&strings=kill"
method = "POST"
params = ["posts=should", "fun=kill", "not=true"]
signature_in = "query"
timeout_seconds = 5

[credentials]
consumer_key = "node-test-key"
key_server_url = "http://localhost:8787/proxy/8000/key"

[output]
pretty = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.method(), "POST");
        assert_eq!(config.params().unwrap().len(), 3);
        assert_eq!(config.signature_transport(), SignatureTransport::QueryString);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(
            config.secret_location(),
            SecretLocation::KeyServer("http://localhost:8787/proxy/8000/key".to_string())
        );
        assert!(config.output_options().pretty);
        assert!(!config.output_options().include_status);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("OAUTH_PROBE_TEST_SECRET_FILE", "/tmp/probe-secret");

        let toml_content = r#"
[request]
url = "http://localhost:8008/job/12345"

[credentials]
consumer_key = "rust-test-key"
secret_file = "${OAUTH_PROBE_TEST_SECRET_FILE}"
access_token = "${OAUTH_PROBE_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.secret_location(),
            SecretLocation::File(PathBuf::from("/tmp/probe-secret"))
        );
        assert_eq!(config.access_token().token, "${OAUTH_PROBE_TEST_UNSET_VAR}");

        std::env::remove_var("OAUTH_PROBE_TEST_SECRET_FILE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[request]
url = "invalid-url"

[credentials]
consumer_key = "rust-test-key"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[request]
url = "http://localhost:8008/job/12345"

[credentials]
consumer_key = "rust-test-key"
secret_file = "keys/rust-test-key"
key_server_url = "http://localhost:8787/proxy/8000/key"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[request\nurl = ").unwrap_err();
        assert!(matches!(err, ProbeError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[request]
url = "http://localhost:8008/job/12345"
method = "DELETE"

[credentials]
consumer_key = "file-test-key"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.consumer_key(), "file-test-key");
        assert_eq!(config.method(), "DELETE");
    }
}
