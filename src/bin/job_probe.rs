//! 對本機 job server 送出一次 OAuth 簽章的 GET，並印出回應內容。
//! secret 檔與 URL 都是固定的；要調整請改用 `oauth-probe`。

use oauth_probe::config::{default_secret_path, DEFAULT_CONSUMER_KEY, DEFAULT_KEYS_DIR};
use oauth_probe::domain::model::{OutputOptions, SecretLocation, SignatureTransport};
use oauth_probe::domain::ports::ConfigProvider;
use oauth_probe::oauth::AccessToken;
use oauth_probe::utils::error::report_and_exit;
use oauth_probe::utils::logger;
use oauth_probe::{JobProbe, ProbeEngine, ProbeError};
use std::time::Duration;

const JOB_URL: &str = "http://localhost:8008/job/12345";

struct FixedJobRequest;

impl ConfigProvider for FixedJobRequest {
    fn url(&self) -> &str {
        JOB_URL
    }

    fn method(&self) -> &str {
        "GET"
    }

    fn consumer_key(&self) -> &str {
        DEFAULT_CONSUMER_KEY
    }

    fn secret_location(&self) -> SecretLocation {
        SecretLocation::File(default_secret_path(DEFAULT_KEYS_DIR, DEFAULT_CONSUMER_KEY))
    }

    fn access_token(&self) -> AccessToken {
        AccessToken::default()
    }

    fn params(&self) -> oauth_probe::Result<Vec<(String, String)>> {
        Ok(Vec::new())
    }

    fn signature_transport(&self) -> SignatureTransport {
        SignatureTransport::Header
    }

    fn timeout(&self) -> Option<Duration> {
        None
    }
}

#[tokio::main]
async fn main() {
    logger::init_cli_logger(false);

    let engine = match JobProbe::from_config(FixedJobRequest) {
        Ok(probe) => ProbeEngine::new(probe),
        Err(e) => report_and_exit(&e),
    };

    let response = match engine.run().await {
        Ok(response) => response,
        Err(e) => report_and_exit(&e),
    };
    if let Err(e) = response.write_to(OutputOptions::default(), &mut std::io::stdout().lock()) {
        report_and_exit(&ProbeError::from(e));
    }
}
