pub mod config;
pub mod core;
pub mod domain;
pub mod oauth;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use crate::core::{engine::ProbeEngine, probe::JobProbe};
pub use utils::error::{ProbeError, Result};
