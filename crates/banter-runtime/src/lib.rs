//! # Banter Runtime
//!
//! Process-level plumbing for Banter deployments: layered configuration
//! loading (defaults, a TOML file, `BANTER_*` environment variables) and
//! tracing-subscriber logging setup.

pub mod config;
pub mod logging;

pub use config::{BanterConfig, ConfigError, ConfigLoader, ConfigResult, LogFormat, LoggingConfig};
pub use logging::{LoggingBuilder, init_from_config};
