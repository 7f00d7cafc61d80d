//! Configuration management for docknav.
//!
//! User settings are persisted as JSON in the platform configuration
//! directory and can be overridden from the command line.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DockNavError;
use crate::Result;

/// Persistent user settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// List stopped containers as well as running ones
    pub show_all_containers: bool,
    /// Number of log lines fetched for the logs pane
    pub log_tail: u32,
    /// Seconds the engine waits before killing a stopping container
    pub stop_timeout_secs: i64,
    /// Spinner / redraw tick in milliseconds
    pub tick_rate_ms: u64,
    /// Engine address; local defaults when unset
    pub docker_host: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_all_containers: true,
            log_tail: 100,
            stop_timeout_secs: 10,
            tick_rate_ms: 100,
            docker_host: None,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults
    /// when no file exists yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load settings from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        tracing::debug!("Loading settings from: {:?}", config_path);

        if !config_path.exists() {
            tracing::debug!("No config file found, using default settings");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| DockNavError::ConfigFile {
            message: "Failed to read config file".to_string(),
            path: config_path.to_path_buf(),
            source: e.into(),
        })?;

        serde_json::from_str(&content).map_err(|e| DockNavError::ConfigFile {
            message: "Failed to parse config file".to_string(),
            path: config_path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save settings to an explicit path, creating parent directories
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DockNavError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DockNavError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, content)
            .map_err(|e| DockNavError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.log_tail == 0 {
            return Err(DockNavError::Config(
                "Log tail must be at least 1 line".to_string(),
            ));
        }

        if !(16..=1000).contains(&self.tick_rate_ms) {
            return Err(DockNavError::Config(format!(
                "Tick rate must be between 16 and 1000 ms, got {}",
                self.tick_rate_ms
            )));
        }

        if self.stop_timeout_secs < 0 {
            return Err(DockNavError::Config(
                "Stop timeout cannot be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.json"))
    }

    /// Default location of the log file
    pub fn default_log_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("docknav.log"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "docknav", "docknav").ok_or_else(|| {
            DockNavError::Config("Failed to determine config directory".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::{parallel, serial};

    use super::*;

    #[test]
    #[parallel]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.show_all_containers);
        assert_eq!(settings.log_tail, 100);
        assert_eq!(settings.stop_timeout_secs, 10);
        assert!(settings.docker_host.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    #[parallel]
    fn test_invalid_tail() {
        let settings = Settings {
            log_tail: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    #[parallel]
    fn test_invalid_tick_rate() {
        let settings = Settings {
            tick_rate_ms: 5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    #[parallel]
    fn test_negative_stop_timeout() {
        let settings = Settings {
            stop_timeout_secs: -1,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    #[parallel]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[parallel]
    fn test_save_load_roundtrip_with_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let settings = Settings {
            show_all_containers: false,
            log_tail: 250,
            docker_host: Some("unix:///var/run/docker.sock".to_string()),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    #[parallel]
    fn test_partial_file_fills_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "log_tail": 42 }"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.log_tail, 42);
        assert!(loaded.show_all_containers);
    }

    #[test]
    #[parallel]
    fn test_corrupt_file_is_config_file_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        match Settings::load_from(&path) {
            Err(DockNavError::ConfigFile { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ConfigFile error, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    #[cfg(target_os = "linux")]
    fn test_default_location_uses_xdg_config_home() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

        let settings = Settings {
            log_tail: 7,
            ..Settings::default()
        };
        settings.save().unwrap();

        let loaded = Settings::load().unwrap();
        assert_eq!(loaded.log_tail, 7);
        assert!(Settings::config_path().unwrap().starts_with(temp_dir.path()));
    }
}
