use crate::domain::ports::SecretSource;
use crate::oauth::encoding::encode;
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// 向 key server 取得 consumer secret：`GET {base}/{consumer_key}/`
#[derive(Debug, Clone)]
pub struct KeyServerSecretSource {
    base_url: String,
    client: Client,
}

impl KeyServerSecretSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn key_url(&self, consumer_key: &str) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            encode(consumer_key)
        )
    }
}

#[async_trait]
impl SecretSource for KeyServerSecretSource {
    async fn load_secret(&self, consumer_key: &str) -> Result<String> {
        let url = self.key_url(consumer_key);
        tracing::debug!("Fetching consumer secret from: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::KeyServerError {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let secret = std::str::from_utf8(&body)
            .map_err(|_| ProbeError::InvalidSecretEncoding { source_name: url.clone() })?;

        Ok(super::normalize_secret(secret))
    }

    fn describe(&self, consumer_key: &str) -> String {
        format!("key server {}", self.key_url(consumer_key))
    }
}
