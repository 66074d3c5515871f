use anyhow::{Context, Result};
use ridekit_engine::Units;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Preferred unit system for input and display
    #[serde(default)]
    pub units: Units,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the weather middleware (holds the upstream API key)
    pub api_base_url: String,

    /// Cache freshness window in minutes
    pub cache_minutes: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8787".to_string(),
            cache_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Dark mode enabled
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ridekit");

        Self {
            config_dir,
            units: Units::default(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }
        Ok((config, validation))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        match Url::parse(&self.weather.api_base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                result.add_error(
                    "weather.api_base_url",
                    format!("unsupported scheme '{}'", url.scheme()),
                );
            }
            Err(e) => {
                result.add_error("weather.api_base_url", format!("invalid URL: {e}"));
            }
        }

        if self.weather.cache_minutes == 0 {
            result.add_warning(
                "weather.cache_minutes",
                "cache disabled; every request will hit the weather API",
            );
        }

        result
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("ridekit");
        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "{}", result.error_summary());
        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.weather.cache_minutes, 30);
    }

    #[test]
    fn test_invalid_api_base_url_is_an_error() {
        let mut config = Config::default();
        config.weather.api_base_url = "not a url".to_string();

        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.error_summary().contains("weather.api_base_url"));
    }

    #[test]
    fn test_non_http_scheme_is_an_error() {
        let mut config = Config::default();
        config.weather.api_base_url = "ftp://example.com".to_string();

        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_zero_cache_minutes_is_a_warning() {
        let mut config = Config::default();
        config.weather.cache_minutes = 0;

        let result = config.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = Config::default();
        config.units = Units::Imperial;
        config.ui.dark_mode = true;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(back.units, Units::Imperial);
        assert!(back.ui.dark_mode);
        assert_eq!(back.weather.api_base_url, config.weather.api_base_url);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str(r#"config_dir = "/tmp/ridekit""#).unwrap();
        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.weather.cache_minutes, 30);
        assert!(!config.ui.dark_mode);
    }
}
