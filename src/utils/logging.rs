//! Logging initialisation and output formatting

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::{PrepError, PrepResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line text
    Pretty,
    /// Single-line text
    Compact,
    /// JSON lines for structured collection
    Json,
}

impl FromStr for LogFormat {
    type Err = PrepError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(PrepError::config(format!("Unknown log format '{}'", other))),
        }
    }
}

/// Pick the filter: explicit level, then `RUST_LOG`, then the settings level
pub fn build_filter(cli_level: Option<&str>, settings_level: &str) -> PrepResult<EnvFilter> {
    let directive = match cli_level {
        Some(level) => level.to_string(),
        None => match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => settings_level.to_string(),
        },
    };

    EnvFilter::try_new(&directive)
        .map_err(|e| PrepError::config(format!("Invalid log level '{}': {}", directive, e)))
}

/// Install the global subscriber, writing to stderr
///
/// Stdout stays reserved for the decision record. Calling this twice is a
/// no-op for the second call.
pub fn init_logging(filter: EnvFilter, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    match installed {
        Ok(()) => tracing::debug!(?format, "Logging initialised"),
        Err(e) => tracing::debug!(error = %e, "Global subscriber already set, keeping it"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!(" pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_explicit_level_wins() {
        let filter = build_filter(Some("debug"), "warn").unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        init_logging(build_filter(Some("warn"), "info").unwrap(), LogFormat::Compact);
        init_logging(build_filter(Some("debug"), "info").unwrap(), LogFormat::Json);
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(build_filter(Some("streamprep=notalevel"), "info").is_err());
    }
}
