//! Configuration management for filekeep.
//!
//! This module handles loading and saving configuration from/to a TOML file in
//! the application data directory. It carries every value the GUI layer reads:
//! window sizing, polling intervals, item spacing, theme colors, size limits,
//! logging settings and additional classifier extensions. On first run, a
//! default configuration is written automatically.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

use crate::paths::{APP_NAME, AppPaths};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppInfo,
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub visual: VisualConfig,
    pub theme: ThemeConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    /// Extra extensions per category key, appended to the built-in table
    pub categories: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub author: String,
}

/// Window geometry in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub min_width: u32,
    pub min_height: u32,
    pub default_width: u32,
    pub default_height: u32,
}

/// Polling periods in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub file_check_interval_ms: u64,
    pub autosave_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub item_height: u32,
    pub item_spacing: u32,
    pub scrollbar_width: u32,
}

/// Theme colors, as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: String,
    pub surface: String,
    pub surface_variant: String,
    pub surface_hover: String,
    pub primary: String,
    pub primary_hover: String,
    pub secondary: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub text_tertiary: String,
    pub text_disabled: String,
    pub border: String,
    pub border_hover: String,
    pub error: String,
    pub error_hover: String,
    pub success: String,
    pub warning: String,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Files above this size are listed without detailed information
    pub max_file_size_mb: u64,
}

/// Rotating log file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Written as `"INFO"`, `"DEBUG"`, ...; matched case-insensitively
    pub level: LevelFilter,
    pub max_size_bytes: u64,
    pub backup_count: u32,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            author: "rottedfm".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_width: 600,
            min_height: 400,
            default_width: 800,
            default_height: 600,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            file_check_interval_ms: 2000,
            autosave_interval_ms: 30000,
        }
    }
}

impl TimingConfig {
    pub fn file_check_interval(&self) -> Duration {
        Duration::from_millis(self.file_check_interval_ms.max(1))
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms.max(1))
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            item_height: 80,
            item_spacing: 5,
            scrollbar_width: 12,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1a1a1a".to_string(),
            surface: "#2a2a2a".to_string(),
            surface_variant: "#3a3a3a".to_string(),
            surface_hover: "#454545".to_string(),
            primary: "#4a90e2".to_string(),
            primary_hover: "#357abd".to_string(),
            secondary: "#6c757d".to_string(),
            text_primary: "#ffffff".to_string(),
            text_secondary: "#cccccc".to_string(),
            text_tertiary: "#aaaaaa".to_string(),
            text_disabled: "#888888".to_string(),
            border: "#555555".to_string(),
            border_hover: "#777777".to_string(),
            error: "#dc3545".to_string(),
            error_hover: "#c82333".to_string(),
            success: "#28a745".to_string(),
            warning: "#ffc107".to_string(),
            info: "#17a2b8".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Looks up a color by its semantic name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// All colors as `(name, value)` pairs, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 18] {
        [
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("surface_variant", self.surface_variant.as_str()),
            ("surface_hover", self.surface_hover.as_str()),
            ("primary", self.primary.as_str()),
            ("primary_hover", self.primary_hover.as_str()),
            ("secondary", self.secondary.as_str()),
            ("text_primary", self.text_primary.as_str()),
            ("text_secondary", self.text_secondary.as_str()),
            ("text_tertiary", self.text_tertiary.as_str()),
            ("text_disabled", self.text_disabled.as_str()),
            ("border", self.border.as_str()),
            ("border_hover", self.border_hover.as_str()),
            ("error", self.error.as_str()),
            ("error_hover", self.error_hover.as_str()),
            ("success", self.success.as_str()),
            ("warning", self.warning.as_str()),
            ("info", self.info.as_str()),
        ]
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 1024,
        }
    }
}

impl LimitsConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            max_size_bytes: 5 * 1024 * 1024,
            backup_count: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppInfo::default(),
            window: WindowConfig::default(),
            timing: TimingConfig::default(),
            visual: VisualConfig::default(),
            theme: ThemeConfig::default(),
            limits: LimitsConfig::default(),
            logging: LoggingConfig::default(),
            categories: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration from the data directory, creating a default if it doesn't exist.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O fails or if the TOML is malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use filekeep::config::Config;
    /// use filekeep::paths::{APP_NAME, AppPaths};
    ///
    /// # fn main() -> color_eyre::Result<()> {
    /// let paths = AppPaths::resolve(APP_NAME)?;
    /// let config = Config::load(&paths)?;
    /// println!("Polling every {} ms", config.timing.file_check_interval_ms);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(paths: &AppPaths) -> Result<Self> {
        let config_path = paths.config_file_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save(paths)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .wrap_err_with(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Invalid configuration in {}", config_path.display()))?;

        Ok(config)
    }

    /// Saves the configuration to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O fails or if serialization fails.
    pub fn save(&self, paths: &AppPaths) -> Result<()> {
        let config_path = paths.config_file_path();
        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)
            .wrap_err_with(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }
}
