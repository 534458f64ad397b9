use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_true")]
    pub show_toasts: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Speak feedback and notifications out loud
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Ask for camera access before each exercise session
    #[serde(default = "default_true")]
    pub request_camera: bool,
}

// Default value functions
fn default_theme() -> String {
    "dark".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            voice: VoiceConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            date_format: default_date_format(),
            show_toasts: default_true(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self { enabled: false }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_camera: default_true(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.rehabconnect/)
    pub fn config_dir() -> Result<PathBuf> {
        // Check for test environment variable first
        if let Ok(test_path) = std::env::var("REHABCONNECT_CONFIG_DIR") {
            return Ok(PathBuf::from(test_path));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".rehabconnect"))
    }

    /// Get config file path (~/.rehabconnect/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if !config_file.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        let config_file = Self::config_file()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ui.theme, "dark");
        assert!(config.ui.show_toasts);
        assert!(!config.voice.enabled);
        assert!(config.session.request_camera);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.ui.theme, deserialized.ui.theme);
        assert_eq!(config.voice.enabled, deserialized.voice.enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[voice]\nenabled = true\n").unwrap();
        assert!(config.voice.enabled);
        assert_eq!(config.ui.theme, "dark");
        assert!(config.session.request_camera);
    }
}
