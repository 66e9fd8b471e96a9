//! Configuration schema and figment-based loader.
//!
//! Sources are layered, later overriding earlier:
//!
//! 1. Built-in defaults
//! 2. `banter.toml` in the working directory (or an explicit file)
//! 3. Environment variables (`BANTER_` prefix, `__` as section separator)
//!
//! ```text
//! BANTER_LOGGING__LEVEL=debug        → logging.level = "debug"
//! BANTER_INTAKE__COOLDOWN_HOURS=24   → intake.cooldown_hours = 24
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use banter_intake::IntakeConfig;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The explicitly requested file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Extraction from the layered sources failed.
    #[error("failed to extract configuration: {0}")]
    Extract(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Schema
// =============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BanterConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Intake flow settings.
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line, abbreviated output.
    #[default]
    Compact,
    /// The default tracing-subscriber format.
    Full,
    /// Multi-line, human-oriented output.
    Pretty,
}

// =============================================================================
// Loader
// =============================================================================

/// Layered configuration loader.
///
/// ```rust,ignore
/// let config = ConfigLoader::new().load()?;
/// let config = ConfigLoader::new().file("deploy/banter.toml").load()?;
/// ```
#[derive(Default)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    skip_env: bool,
}

impl ConfigLoader {
    /// Creates a loader with the default sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a specific configuration file to load instead of searching the
    /// working directory.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables the environment-variable layer (useful in tests).
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads and extracts the configuration.
    pub fn load(self) -> ConfigResult<BanterConfig> {
        let mut figment = Figment::from(Serialized::defaults(BanterConfig::default()));

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            figment = figment.merge(Toml::file(path));
        } else {
            // Optional: absence just means defaults.
            figment = figment.merge(Toml::file("banter.toml"));
        }

        if !self.skip_env {
            figment = figment.merge(Env::prefixed("BANTER_").split("__"));
        }

        let config: BanterConfig = figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;

        debug!(
            logging_level = %config.logging.level,
            postings_channel = %config.intake.postings_channel,
            "Configuration loaded"
        );

        Ok(config)
    }
}
