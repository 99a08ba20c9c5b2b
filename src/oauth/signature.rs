//! OAuth 1.0a HMAC-SHA1 簽章 (RFC 5849 3.4)

use crate::oauth::encoding::encode;
use crate::oauth::{OAUTH_SIGNATURE, REALM};
use crate::utils::error::{ProbeError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// 編碼後依名稱、再依值排序，重複名稱全部保留
pub fn normalize_parameters(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .filter(|(name, _)| name != OAUTH_SIGNATURE && name != REALM)
        .map(|(name, value)| (encode(name), encode(value)))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// scheme 與 host 轉小寫，預設 port 省略，不含 query 與 fragment
pub fn base_string_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

/// URL query 參數會與 `extra_params` 合併後一起簽章
pub fn signature_base_string(method: &str, url: &Url, extra_params: &[(String, String)]) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    params.extend(extra_params.iter().cloned());

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(&base_string_uri(url)),
        encode(&normalize_parameters(&params))
    )
}

/// token secret 為空時仍保留結尾的 `&`
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", encode(consumer_secret), encode(token_secret))
}

pub fn sign_hmac_sha1(key: &str, base_string: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| ProbeError::SigningError {
        message: format!("Failed to create HMAC: {}", e),
    })?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
