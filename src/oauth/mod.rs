pub mod consumer;
pub mod encoding;
pub mod signature;

pub use consumer::{AccessToken, Authorization, Consumer, OAuthStamp, ServiceProvider};

pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_VERSION: &str = "oauth_version";
pub const REALM: &str = "realm";

pub const SIGNATURE_METHOD_HMAC_SHA1: &str = "HMAC-SHA1";
pub const OAUTH_VERSION_1: &str = "1.0";
