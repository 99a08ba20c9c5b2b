use crate::oauth::encoding::encode;
use crate::oauth::signature::{sign_hmac_sha1, signature_base_string, signing_key};
use crate::oauth::{
    OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD, OAUTH_TIMESTAMP,
    OAUTH_TOKEN, OAUTH_VERSION, OAUTH_VERSION_1, SIGNATURE_METHOD_HMAC_SHA1,
};
use crate::utils::error::Result;
use rand::Rng;
use url::Url;

/// 三段式流程的端點；只做簽章時全部留空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProvider {
    pub request_token_url: String,
    pub authorize_token_url: String,
    pub access_token_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub secret: String,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

/// 每個請求各自的 nonce 與時間戳記 (秒)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthStamp {
    pub nonce: String,
    pub timestamp: i64,
}

impl OAuthStamp {
    pub fn new(nonce: impl Into<String>, timestamp: i64) -> Self {
        Self {
            nonce: nonce.into(),
            timestamp,
        }
    }

    pub fn fresh() -> Self {
        let bytes: [u8; 16] = rand::thread_rng().gen();
        Self {
            nonce: hex::encode(bytes),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// 已簽章的協定參數，依名稱排序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    params: Vec<(String, String)>,
}

impl Authorization {
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn signature(&self) -> Option<&str> {
        self.get(OAUTH_SIGNATURE)
    }

    pub fn to_header(&self) -> String {
        let fields = self
            .params
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", encode(name), encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {}", fields)
    }

    pub fn apply_to_query(&self, url: &mut Url) {
        url.query_pairs_mut().extend_pairs(
            self.params
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
    }
}

#[derive(Debug, Clone)]
pub struct Consumer {
    key: String,
    secret: String,
    provider: ServiceProvider,
}

impl Consumer {
    pub fn new(key: impl Into<String>, secret: impl Into<String>, provider: ServiceProvider) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            provider,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn provider(&self) -> &ServiceProvider {
        &self.provider
    }

    pub fn protocol_params(&self, token: &AccessToken, stamp: &OAuthStamp) -> Vec<(String, String)> {
        let mut params = vec![
            (OAUTH_CONSUMER_KEY.to_string(), self.key.clone()),
            (OAUTH_NONCE.to_string(), stamp.nonce.clone()),
            (
                OAUTH_SIGNATURE_METHOD.to_string(),
                SIGNATURE_METHOD_HMAC_SHA1.to_string(),
            ),
            (OAUTH_TIMESTAMP.to_string(), stamp.timestamp.to_string()),
        ];
        if !token.is_empty() {
            params.push((OAUTH_TOKEN.to_string(), token.token.clone()));
        }
        params.push((OAUTH_VERSION.to_string(), OAUTH_VERSION_1.to_string()));
        params
    }

    /// `form_params` 只放 form-urlencoded 的 body 參數，URL 上的 query 會自動納入
    pub fn sign(
        &self,
        method: &str,
        url: &Url,
        form_params: &[(String, String)],
        token: &AccessToken,
        stamp: &OAuthStamp,
    ) -> Result<Authorization> {
        let mut params = self.protocol_params(token, stamp);

        let mut signed_params = params.clone();
        signed_params.extend(form_params.iter().cloned());

        let base_string = signature_base_string(method, url, &signed_params);
        tracing::debug!("Signature base string: {}", base_string);

        let key = signing_key(&self.secret, &token.secret);
        let signature = sign_hmac_sha1(&key, &base_string)?;

        params.push((OAUTH_SIGNATURE.to_string(), signature));
        params.sort();

        Ok(Authorization { params })
    }
}
