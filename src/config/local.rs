use crate::domain::ports::SecretSource;
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// 從本機檔案讀取明文 consumer secret
#[derive(Debug, Clone)]
pub struct FileSecretSource {
    path: PathBuf,
}

impl FileSecretSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SecretSource for FileSecretSource {
    async fn load_secret(&self, _consumer_key: &str) -> Result<String> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ProbeError::SecretReadError {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(super::normalize_secret(&content))
    }

    fn describe(&self, _consumer_key: &str) -> String {
        format!("file {}", self.path.display())
    }
}
