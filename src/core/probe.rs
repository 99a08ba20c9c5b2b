use crate::config::secret_source_for;
use crate::core::{ConfigProvider, Probe, ProbeResponse, SecretSource, SignedRequest};
use crate::domain::model::SignatureTransport;
use crate::oauth::{Consumer, OAuthStamp, ServiceProvider};
use crate::utils::error::{ProbeError, Result};
use reqwest::{Client, Method};
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub struct JobProbe<S: SecretSource, C: ConfigProvider> {
    pub(crate) secret_source: S,
    pub(crate) config: C,
    pub(crate) client: Client,
}

impl<S: SecretSource, C: ConfigProvider> JobProbe<S, C> {
    pub fn new(secret_source: S, config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            secret_source,
            config,
            client: builder.build()?,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<C: ConfigProvider> JobProbe<Box<dyn SecretSource>, C> {
    /// 依配置中的 secret 位置挑選來源
    pub fn from_config(config: C) -> Result<Self> {
        let secret_source = secret_source_for(&config.secret_location());
        Self::new(secret_source, config)
    }
}

/// POST 與 PUT 的參數放在 form body，其餘方法併入 query
fn sends_form_body(method: &str) -> bool {
    matches!(method, "POST" | "PUT")
}

#[async_trait::async_trait]
impl<S: SecretSource, C: ConfigProvider> Probe for JobProbe<S, C> {
    async fn credentials(&self) -> Result<Consumer> {
        let consumer_key = self.config.consumer_key();
        tracing::info!(
            "🔑 Loading consumer secret for '{}' from {}",
            consumer_key,
            self.secret_source.describe(consumer_key)
        );

        let secret = self.secret_source.load_secret(consumer_key).await?;
        if secret.is_empty() {
            return Err(ProbeError::ConfigValidationError {
                field: "consumer_secret".to_string(),
                message: format!("Secret for consumer key '{}' is empty", consumer_key),
            });
        }

        Ok(Consumer::new(consumer_key, secret, ServiceProvider::default()))
    }

    fn prepare(&self, consumer: &Consumer, stamp: &OAuthStamp) -> Result<SignedRequest> {
        let method = self.config.method().to_ascii_uppercase();
        let mut url = Url::parse(self.config.url())?;
        let params = self.config.params()?;

        let form_params = if sends_form_body(&method) {
            params
        } else {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params.iter());
            }
            Vec::new()
        };

        let token = self.config.access_token();
        let authorization = consumer.sign(&method, &url, &form_params, &token, stamp)?;

        let mut headers = Vec::new();
        match self.config.signature_transport() {
            SignatureTransport::Header => {
                headers.push(("Authorization".to_string(), authorization.to_header()));
            }
            SignatureTransport::QueryString => authorization.apply_to_query(&mut url),
        }

        let form_body = if form_params.is_empty() {
            None
        } else {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
            Some(
                url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(form_params.iter())
                    .finish(),
            )
        };

        tracing::debug!("Prepared signed request: {} {}", method, url);

        Ok(SignedRequest {
            method,
            url,
            headers,
            form_body,
        })
    }

    async fn execute(&self, request: SignedRequest) -> Result<ProbeResponse> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|e| {
            ProbeError::InvalidConfigValueError {
                field: "method".to_string(),
                value: request.method.clone(),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!("Making API request to: {}", request.url);

        let mut builder = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.form_body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        // 不依 Content-Type 轉碼，位元組原樣保留
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ProbeError::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ProbeResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
