//! Logging configuration and setup over tracing-subscriber.

use tracing_subscriber::EnvFilter;

use crate::error::{TelemetryError, TelemetryResult};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line output, suitable for piping.
    #[default]
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base level filter (e.g. `info`, `debug`).
    level: String,
    /// Additional per-target directives (e.g. `bazaar_runtime=trace`).
    directives: Vec<String>,
    /// Output format.
    format: LogFormat,
}

impl LogConfig {
    /// Create a config with the given base level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            directives: Vec::new(),
            format: LogFormat::default(),
        }
    }

    /// Add a per-target filter directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Select the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn env_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut spec = self.level.clone();
        for directive in &self.directives {
            spec.push(',');
            spec.push_str(directive);
        }
        spec.parse()
            .map_err(|e| TelemetryError::ConfigError(format!("invalid filter `{spec}`: {e}")))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

/// Install the global tracing subscriber from `config`.
///
/// The `RUST_LOG` environment variable, when set, overrides the configured
/// level and directives.
///
/// # Errors
///
/// Returns an error if the filter spec does not parse or if a global
/// subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => config.env_filter()?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| TelemetryError::InitError(e.to_string()))
}

/// Install a subscriber with the default configuration (`info`, compact).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_spec_includes_directives() {
        let config = LogConfig::new("info").with_directive("bazaar_runtime=debug");
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = LogConfig::new("not a level!!");
        assert!(matches!(
            config.env_filter(),
            Err(TelemetryError::ConfigError(_))
        ));
    }
}
