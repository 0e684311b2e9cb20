//! The [`Config`] struct and its YAML persistence.
//!
//! Config lives at `~/.config/backupfont/config.yaml` (XDG convention on every
//! platform except Windows, which uses the roaming config dir). A missing file
//! is not an error: defaults are used and nothing is written back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{FontmapFormat, LogLevel, PriorityOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// How overlapping coverage is resolved when building a fontmap.
    pub priority: PriorityOrder,

    /// Layout of written fontmaps.
    pub format: FontmapFormat,

    /// Log verbosity.
    pub log_level: LogLevel,
}

impl Config {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, or defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string. Unknown keys are ignored and
    /// missing keys take their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("backupfont")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("backupfont")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_legacy_behaviour() {
        let config = Config::default();
        assert_eq!(config.priority, PriorityOrder::LastWins);
        assert_eq!(config.format, FontmapFormat::Legacy);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("priority: first-wins\n").unwrap();
        assert_eq!(config.priority, PriorityOrder::FirstWins);
        assert_eq!(config.format, FontmapFormat::Legacy);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = Config::from_yaml("priority: sideways\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn config_path_ends_with_yaml() {
        let path = Config::config_path();
        assert!(path.ends_with("backupfont/config.yaml"));
    }
}
