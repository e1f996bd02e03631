// src/config.rs

use crate::constants::{
    DEFAULT_INTERPRETER, DEFAULT_PACKAGE_MANAGER, DEFAULT_RUN_SUBCOMMAND, DEFAULT_TIMEOUT_SECS,
    HELPERS_CONFIG_FILENAME,
};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings read from `.achira/helpers.toml`. Every key is optional.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HelperConfig {
    /// The environment manager probed before falling back to a bare interpreter.
    pub package_manager: String,
    /// The manager subcommand that runs a program inside its environment.
    pub run_subcommand: String,
    /// Generic interpreter name for sub-scripts.
    pub interpreter: String,
    pub timeout_secs: u64,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            run_subcommand: DEFAULT_RUN_SUBCOMMAND.to_string(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HelperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Loads `helpers.toml` from an `.achira` directory, falling back to defaults
/// when the directory or the file does not exist.
pub fn load_helper_config(achira_dir: &Path) -> Result<HelperConfig, ConfigError> {
    let config_path = achira_dir.join(HELPERS_CONFIG_FILENAME);
    if !config_path.is_file() {
        log::debug!(
            "No {} at {}; using defaults.",
            HELPERS_CONFIG_FILENAME,
            achira_dir.display()
        );
        return Ok(HelperConfig::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Read {
        path: config_path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: config_path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_helper_config(&tmp.path().join("does-not-exist")).unwrap();
        assert_eq!(config, HelperConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(HELPERS_CONFIG_FILENAME),
            "interpreter = \"python3\"\ntimeout_secs = 30\n",
        )
        .unwrap();

        let config = load_helper_config(tmp.path()).unwrap();

        assert_eq!(config.interpreter, "python3");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.package_manager, "uv");
        assert_eq!(config.run_subcommand, "run");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(HELPERS_CONFIG_FILENAME), "shell = \"zsh\"\n").unwrap();

        let result = load_helper_config(tmp.path());

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
