//! Configuration management for spraycoat-dashboard
//!
//! Config stored at: ~/.config/spraycoat-dashboard/config.json

use serde::{Deserialize, Serialize};
use spraycoat_types::{ConfigError, OutputFormat, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "spraycoat-dashboard";

/// Longest accepted inactivity timeout: 30 days
pub const MAX_SESSION_TIMEOUT_MINUTES: i64 = 30 * 24 * 60;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Record store directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Minutes of inactivity before the session is signed out
    #[serde(default = "default_session_timeout")]
    pub session_timeout_minutes: i64,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_session_timeout() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_format: default_output_format(),
            session_timeout_minutes: default_session_timeout(),
            log_json: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Where the signed-in session is kept
    pub fn session_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }

    /// Get the record store directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SESSION_TIMEOUT_MINUTES).contains(&self.session_timeout_minutes) {
            return Err(ConfigError::InvalidValue(format!(
                "session_timeout_minutes must be between 1 and {}, got {}",
                MAX_SESSION_TIMEOUT_MINUTES, self.session_timeout_minutes
            ))
            .into());
        }
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Spraycoat Dashboard Configuration")?;
        writeln!(f, "=================================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:        {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Session timeout: {} min", self.session_timeout_minutes)?;
        writeln!(f, "JSON logs:       {}", self.log_json)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.session_timeout_minutes, 30);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            output_format: OutputFormat::Json,
            session_timeout_minutes: 45,
            log_json: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
        assert_eq!(config.data_dir().unwrap(), dir.path().join("data"));
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output_format":"json"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.session_timeout_minutes, 30);
        assert!(!config.log_json);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let dir = tempdir().unwrap();
        let config = Config {
            session_timeout_minutes: 0,
            ..Default::default()
        };
        assert!(config.save_to(&dir.path().join("config.json")).is_err());
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        let dir = tempdir().unwrap();
        let config = Config {
            session_timeout_minutes: 1_000_000_000_000_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.save_to(&dir.path().join("config.json")).is_err());

        let at_limit = Config {
            session_timeout_minutes: MAX_SESSION_TIMEOUT_MINUTES,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_oversized_timeout_in_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"session_timeout_minutes": 1000000000000000000}"#).unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
