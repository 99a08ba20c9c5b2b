use crate::domain::model::{
    OutputOptions, ProbeResponse, SecretLocation, SignatureTransport, SignedRequest,
};
use crate::oauth::{AccessToken, Consumer, OAuthStamp};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn load_secret(&self, consumer_key: &str) -> Result<String>;

    /// 給日誌用的來源描述
    fn describe(&self, consumer_key: &str) -> String;
}

#[async_trait]
impl<T: SecretSource + ?Sized> SecretSource for Box<T> {
    async fn load_secret(&self, consumer_key: &str) -> Result<String> {
        (**self).load_secret(consumer_key).await
    }

    fn describe(&self, consumer_key: &str) -> String {
        (**self).describe(consumer_key)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn url(&self) -> &str;
    fn method(&self) -> &str;
    fn consumer_key(&self) -> &str;
    fn secret_location(&self) -> SecretLocation;
    fn access_token(&self) -> AccessToken;
    /// 已解析的 `name=value` 參數，保留輸入順序
    fn params(&self) -> Result<Vec<(String, String)>>;
    fn signature_transport(&self) -> SignatureTransport;
    fn timeout(&self) -> Option<Duration>;

    fn output_options(&self) -> OutputOptions {
        OutputOptions::default()
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    async fn credentials(&self) -> Result<Consumer>;
    fn prepare(&self, consumer: &Consumer, stamp: &OAuthStamp) -> Result<SignedRequest>;
    async fn execute(&self, request: SignedRequest) -> Result<ProbeResponse>;
}
