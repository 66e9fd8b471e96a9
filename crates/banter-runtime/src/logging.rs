//! Logging setup over tracing-subscriber.
//!
//! ```rust,ignore
//! use banter_runtime::logging::LoggingBuilder;
//!
//! LoggingBuilder::new()
//!     .directive("banter_interact=debug")
//!     .init();
//! ```
//!
//! `RUST_LOG`, when set, takes precedence over the configured base level.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize logging from a [`LoggingConfig`].
///
/// Safe to call more than once; repeated initialization is ignored.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A builder for configuring logging.
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    level: Option<String>,
    directives: Vec<String>,
    format: LogFormat,
}

impl LoggingBuilder {
    /// Creates a new logging builder with the compact format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            level: Some(config.level.clone()),
            directives: Vec::new(),
            format: config.format,
        }
    }

    /// Sets the base log level (e.g. `"debug"`).
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Adds a filter directive (e.g. `"banter_interact=trace"`).
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Initializes the logging system, ignoring repeated initialization.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Tries to initialize the logging system.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();

        match self.format {
            LogFormat::Compact => tracing_subscriber::registry()
                .with(fmt::layer().compact())
                .with(filter)
                .try_init(),
            LogFormat::Full => tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(fmt::layer().pretty())
                .with(filter)
                .try_init(),
        }
    }

    fn build_filter(&self) -> EnvFilter {
        let base = self.level.as_deref().unwrap_or("info");
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base));

        for directive in &self.directives {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        filter
    }
}
