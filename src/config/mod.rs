pub mod key_server;
pub mod local;
pub mod toml_config;

use crate::domain::model::SecretLocation;
use crate::domain::ports::SecretSource;
use std::path::{Path, PathBuf};

pub use key_server::KeyServerSecretSource;
pub use local::FileSecretSource;

pub const DEFAULT_URL: &str = "http://localhost:8008/job/12345";
pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_CONSUMER_KEY: &str = "rust-test-key";
pub const DEFAULT_KEYS_DIR: &str = "keys/8008/8080";

/// keys 目錄下以 consumer key 命名的 secret 檔
pub fn default_secret_path(keys_dir: &str, consumer_key: &str) -> PathBuf {
    Path::new(keys_dir).join(consumer_key)
}

pub fn secret_source_for(location: &SecretLocation) -> Box<dyn SecretSource> {
    match location {
        SecretLocation::File(path) => Box::new(FileSecretSource::new(path.clone())),
        SecretLocation::KeyServer(base_url) => Box::new(KeyServerSecretSource::new(base_url.clone())),
    }
}

/// 與伺服器端 keystore 相同，去除 secret 前後空白
pub(crate) fn normalize_secret(value: &str) -> String {
    value.trim().to_string()
}

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::{default_secret_path, DEFAULT_CONSUMER_KEY, DEFAULT_KEYS_DIR, DEFAULT_METHOD, DEFAULT_URL};
    use crate::domain::model::{OutputOptions, SecretLocation, SignatureTransport};
    use crate::domain::ports::ConfigProvider;
    use crate::oauth::AccessToken;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "oauth-probe")]
    #[command(about = "Send one OAuth 1.0a signed request to a job server and print the response")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_URL)]
        pub url: String,

        #[arg(short = 'X', long, default_value = DEFAULT_METHOD)]
        pub method: String,

        #[arg(long, default_value = DEFAULT_CONSUMER_KEY)]
        pub consumer_key: String,

        #[arg(long, default_value = DEFAULT_KEYS_DIR, help = "Directory holding one secret file per consumer key")]
        pub keys_dir: String,

        #[arg(long, help = "Read the consumer secret from this file instead of <keys-dir>/<consumer-key>")]
        pub secret_file: Option<String>,

        #[arg(long, conflicts_with = "secret_file", help = "Fetch the consumer secret from a key server")]
        pub key_server_url: Option<String>,

        #[arg(long, default_value = "")]
        pub access_token: String,

        #[arg(long, default_value = "")]
        pub access_token_secret: String,

        #[arg(long = "param", value_name = "NAME=VALUE", help = "Request parameter; sent as form body for POST/PUT, query string otherwise")]
        pub params: Vec<String>,

        #[arg(long, value_enum, default_value_t = SignatureTransport::Header)]
        pub signature_in: SignatureTransport,

        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, help = "Pretty-print JSON response bodies")]
        pub pretty: bool,

        #[arg(long, help = "Print the HTTP status code before the body")]
        pub include_status: bool,

        #[arg(long, help = "Print the signed request without sending it")]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl Default for CliConfig {
        fn default() -> Self {
            Self {
                url: DEFAULT_URL.to_string(),
                method: DEFAULT_METHOD.to_string(),
                consumer_key: DEFAULT_CONSUMER_KEY.to_string(),
                keys_dir: DEFAULT_KEYS_DIR.to_string(),
                secret_file: None,
                key_server_url: None,
                access_token: String::new(),
                access_token_secret: String::new(),
                params: Vec::new(),
                signature_in: SignatureTransport::Header,
                timeout_seconds: None,
                pretty: false,
                include_status: false,
                dry_run: false,
                verbose: false,
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn url(&self) -> &str {
            &self.url
        }

        fn method(&self) -> &str {
            &self.method
        }

        fn consumer_key(&self) -> &str {
            &self.consumer_key
        }

        fn secret_location(&self) -> SecretLocation {
            if let Some(base_url) = &self.key_server_url {
                return SecretLocation::KeyServer(base_url.clone());
            }
            match &self.secret_file {
                Some(path) => SecretLocation::File(PathBuf::from(path)),
                None => SecretLocation::File(default_secret_path(&self.keys_dir, &self.consumer_key)),
            }
        }

        fn access_token(&self) -> AccessToken {
            AccessToken::new(&self.access_token, &self.access_token_secret)
        }

        fn params(&self) -> Result<Vec<(String, String)>> {
            self.params
                .iter()
                .map(|raw| validation::validate_param_pair("param", raw))
                .collect()
        }

        fn signature_transport(&self) -> SignatureTransport {
            self.signature_in
        }

        fn timeout(&self) -> Option<Duration> {
            self.timeout_seconds.map(Duration::from_secs)
        }

        fn output_options(&self) -> OutputOptions {
            OutputOptions {
                pretty: self.pretty,
                include_status: self.include_status,
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("url", &self.url)?;
            validation::validate_http_method("method", &self.method)?;
            validation::validate_non_empty_string("consumer_key", &self.consumer_key)?;

            match self.secret_location() {
                SecretLocation::File(path) => {
                    validation::validate_secret_path("secret_file", &path.to_string_lossy())?;
                }
                SecretLocation::KeyServer(base_url) => {
                    validation::validate_url("key_server_url", &base_url)?;
                }
            }

            self.params()?;

            if let Some(timeout) = self.timeout_seconds {
                validation::validate_range("timeout_seconds", timeout, 1, 300)?;
            }

            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_point_at_local_job_server() {
            let config = CliConfig::parse_from(["oauth-probe"]);

            assert_eq!(config.url(), "http://localhost:8008/job/12345");
            assert_eq!(config.method(), "GET");
            assert!(config.access_token().is_empty());
            assert_eq!(
                config.secret_location(),
                SecretLocation::File(PathBuf::from("keys/8008/8080/rust-test-key"))
            );
            assert_eq!(config.signature_transport(), SignatureTransport::Header);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_flags_override_defaults() {
            let config = CliConfig::parse_from([
                "oauth-probe",
                "-X",
                "post",
                "--url",
                "http://localhost:8000/job?do=query",
                "--consumer-key",
                "node-test-key",
                "--key-server-url",
                "http://localhost:8787/proxy/8000/key",
                "--param",
                "beans=either",
                "--param",
                "not=true",
                "--signature-in",
                "query",
                "--timeout-seconds",
                "10",
            ]);

            assert!(config.validate().is_ok());
            assert_eq!(
                config.secret_location(),
                SecretLocation::KeyServer("http://localhost:8787/proxy/8000/key".to_string())
            );
            assert_eq!(
                config.params().unwrap(),
                vec![
                    ("beans".to_string(), "either".to_string()),
                    ("not".to_string(), "true".to_string()),
                ]
            );
            assert_eq!(config.signature_transport(), SignatureTransport::QueryString);
            assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        }

        #[test]
        fn test_secret_file_overrides_keys_dir() {
            let config = CliConfig::parse_from(["oauth-probe", "--secret-file", "/tmp/secret"]);
            assert_eq!(
                config.secret_location(),
                SecretLocation::File(PathBuf::from("/tmp/secret"))
            );
        }

        #[test]
        fn test_invalid_settings_fail_validation() {
            let config = CliConfig {
                method: "PATCH".to_string(),
                ..CliConfig::default()
            };
            assert!(config.validate().is_err());

            let config = CliConfig {
                params: vec!["missing-equals".to_string()],
                ..CliConfig::default()
            };
            assert!(config.validate().is_err());

            let config = CliConfig {
                timeout_seconds: Some(0),
                ..CliConfig::default()
            };
            assert!(config.validate().is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_secret_trims_like_the_keystore() {
        assert_eq!(normalize_secret("secret\n"), "secret");
        assert_eq!(normalize_secret("secret\r\n"), "secret");
        assert_eq!(normalize_secret("  secret \n\n"), "secret");
        assert_eq!(normalize_secret("sec ret"), "sec ret");
        assert_eq!(normalize_secret(" \n"), "");
    }

    #[test]
    fn test_default_secret_path() {
        assert_eq!(
            default_secret_path(DEFAULT_KEYS_DIR, "golang-test-key"),
            PathBuf::from("keys/8008/8080/golang-test-key")
        );
    }
}
