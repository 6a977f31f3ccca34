// TOML config adapter - Settings discovery and loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{PrepError, PrepResult};
use crate::ports::ConfigPort;

/// Settings file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "streamprep.toml";

/// TOML configuration adapter
///
/// Reads the explicit path when one is given (from `--config` or
/// `STREAMPREP_CONFIG`), otherwise `./streamprep.toml` if it exists. An
/// explicit path must exist.
#[derive(Debug, Clone, Default)]
pub struct TomlConfigAdapter {
    explicit_path: Option<PathBuf>,
}

impl TomlConfigAdapter {
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    /// Settings file to read, if any
    pub fn config_path(&self) -> PrepResult<Option<PathBuf>> {
        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                return Err(PrepError::config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.clone()));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        Ok(local.exists().then_some(local))
    }

    fn load_from(path: &Path) -> PrepResult<Settings> {
        let content = std::fs::read_to_string(path)?;
        let settings = Settings::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }
}

impl ConfigPort for TomlConfigAdapter {
    fn load_settings(&self) -> PrepResult<Settings> {
        match self.config_path()? {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No settings file found, using defaults");
                Ok(Settings::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let settings = TomlConfigAdapter::new(Some(path)).load_settings().unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, "pretty");
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let adapter = TomlConfigAdapter::new(Some(PathBuf::from("/no/such/streamprep.toml")));
        assert!(matches!(adapter.load_settings(), Err(PrepError::ConfigError { .. })));
    }

    #[test]
    fn test_invalid_settings_surface_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[nodes]\nknown = [\"a\"]\naccelerated = [\"b\"]\n").unwrap();

        assert!(TomlConfigAdapter::new(Some(path)).load_settings().is_err());
    }
}
