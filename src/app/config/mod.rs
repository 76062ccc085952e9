// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading
//! and saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[endpoint]` - Conversion service base URLs
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `ICED_CONVERT_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Endpoint Selection
//!
//! The `[endpoint]` section carries both a local and a remote base URL; an
//! explicit `use_local` switch picks between them. Missing values fall back
//! silently to the hardcoded defaults. The resolved base URL is handed to
//! the transfer client at startup, so nothing downstream ever inspects the
//! environment.

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Conversion service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    /// Base URL used while developing against a local service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_base_url: Option<String>,

    /// Base URL of the deployed service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_base_url: Option<String>,

    /// Selects the local base URL instead of the remote one.
    #[serde(default = "default_use_local", skip_serializing_if = "Option::is_none")]
    pub use_local: Option<bool>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            local_base_url: Some(DEFAULT_LOCAL_BASE_URL.to_string()),
            remote_base_url: Some(DEFAULT_REMOTE_BASE_URL.to_string()),
            use_local: Some(DEFAULT_USE_LOCAL),
        }
    }
}

impl EndpointConfig {
    /// Resolves the base URL the transfer client should talk to. Absent
    /// values silently fall back to the hardcoded defaults.
    pub fn base_url(&self) -> &str {
        if self.use_local.unwrap_or(DEFAULT_USE_LOCAL) {
            self.local_base_url
                .as_deref()
                .unwrap_or(DEFAULT_LOCAL_BASE_URL)
        } else {
            self.remote_base_url
                .as_deref()
                .unwrap_or(DEFAULT_REMOTE_BASE_URL)
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Conversion service endpoints.
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

fn default_use_local() -> Option<bool> {
    Some(DEFAULT_USE_LOCAL)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional directory override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning key explaining what went wrong; the
/// warning is surfaced as a toast.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            endpoint: EndpointConfig {
                local_base_url: Some("http://127.0.0.1:9000".to_string()),
                remote_base_url: Some("https://convert.example.net".to_string()),
                use_local: Some(true),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir
            .path()
            .join("deep")
            .join("path")
            .join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_points_at_remote_endpoint() {
        let config = Config::default();
        assert_eq!(config.endpoint.base_url(), DEFAULT_REMOTE_BASE_URL);
    }

    #[test]
    fn use_local_selects_local_base_url() {
        let endpoint = EndpointConfig {
            local_base_url: Some("http://localhost:9999".to_string()),
            remote_base_url: Some("https://remote.example".to_string()),
            use_local: Some(true),
        };
        assert_eq!(endpoint.base_url(), "http://localhost:9999");
    }

    #[test]
    fn missing_urls_fall_back_to_hardcoded_defaults() {
        let endpoint = EndpointConfig {
            local_base_url: None,
            remote_base_url: None,
            use_local: Some(true),
        };
        assert_eq!(endpoint.base_url(), DEFAULT_LOCAL_BASE_URL);

        let endpoint = EndpointConfig {
            local_base_url: None,
            remote_base_url: None,
            use_local: None,
        };
        assert_eq!(endpoint.base_url(), DEFAULT_REMOTE_BASE_URL);
    }

    #[test]
    fn partial_config_file_fills_missing_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\nlanguage = \"fr\"\n").expect("write config");

        let loaded = load_from_path(&config_path).expect("load partial config");
        assert_eq!(loaded.general.language.as_deref(), Some("fr"));
        // The endpoint section was absent entirely; defaults apply
        assert_eq!(loaded.endpoint.base_url(), DEFAULT_REMOTE_BASE_URL);
    }

    #[test]
    fn load_with_override_missing_file_returns_default_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_corrupt_file_warns() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("settings.toml"), "][").expect("write corrupt file");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }
}
