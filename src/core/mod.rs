pub mod engine;
pub mod probe;

pub use crate::domain::model::{ProbeResponse, SignedRequest};
pub use crate::domain::ports::{ConfigProvider, Probe, SecretSource};
pub use crate::utils::error::Result;
