//! Configuration management for the CEP weather service
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings.

use crate::CepWeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Environment prefix for all overrides, e.g. `CEP_WEATHER_SERVER__PORT`
pub const ENV_PREFIX: &str = "CEP_WEATHER";

/// Variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "CEP_WEATHER_CONFIG";

/// Plain variable carrying the weather API key, as found in `.env` files
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CepWeatherConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Address lookup service settings
    #[serde(default)]
    pub postal: PostalConfig,
    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for handling one request, upstream calls included
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Largest accepted form body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Address lookup service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalConfig {
    #[serde(default = "default_postal_base_url")]
    pub base_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u64,
}

/// Weather service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key; lookups fail upstream without it
    pub api_key: Option<String>,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    16 * 1024
}

fn default_postal_base_url() -> String {
    "https://brasilapi.com.br".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com".to_string()
}

fn default_upstream_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for PostalConfig {
    fn default() -> Self {
        Self {
            base_url: default_postal_base_url(),
            timeout_seconds: default_upstream_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_upstream_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl PostalConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The configured key, or an empty string when none is set
    #[must_use]
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

impl CepWeatherConfig {
    /// Load configuration from file and the process environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::load_with_env(path, None)
    }

    /// Load configuration from `config_path` (or `config.toml`) with an
    /// explicit environment map. `None` reads the process environment.
    pub fn load_with_env(
        config_path: Option<PathBuf>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        let api_key = match &env {
            Some(map) => map.get(API_KEY_VAR).cloned(),
            None => std::env::var(API_KEY_VAR).ok(),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        if let Some(api_key) = api_key.filter(|key| !key.is_empty()) {
            builder = builder
                .set_override("weather.api_key", api_key)
                .with_context(|| format!("Failed to apply {API_KEY_VAR}"))?;
        }

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: CepWeatherConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(CepWeatherError::config("Server port cannot be 0").into());
        }

        if self.server.max_body_bytes == 0 {
            return Err(CepWeatherError::config("Maximum body size must be positive").into());
        }

        let timeouts = [
            ("Request", self.server.request_timeout_seconds),
            ("Postal API", self.postal.timeout_seconds),
            ("Weather API", self.weather.timeout_seconds),
        ];
        for (name, seconds) in timeouts {
            if !(1..=300).contains(&seconds) {
                return Err(CepWeatherError::config(format!(
                    "{name} timeout must be between 1 and 300 seconds, got {seconds}"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CepWeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CepWeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Postal API", &self.postal.base_url),
            ("Weather API", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CepWeatherError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn missing_file() -> Option<PathBuf> {
        Some(PathBuf::from("does-not-exist/config.toml"))
    }

    #[test]
    fn test_default_config() {
        let config = CepWeatherConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.postal.base_url, "https://brasilapi.com.br");
        assert_eq!(config.weather.base_url, "https://api.weatherapi.com");
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_none());
        assert_eq!(config.weather.api_key_or_empty(), "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        let config = CepWeatherConfig::load_with_env(missing_file(), env(&[])).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_plain_api_key_variable() {
        let config =
            CepWeatherConfig::load_with_env(missing_file(), env(&[("WEATHER_API_KEY", "abc123")]))
                .unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_prefixed_environment_override() {
        let config = CepWeatherConfig::load_with_env(
            missing_file(),
            env(&[
                ("CEP_WEATHER_SERVER__PORT", "9000"),
                ("CEP_WEATHER_LOGGING__FORMAT", "json"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = CepWeatherConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = CepWeatherConfig::default();
        config.weather.timeout_seconds = 0;
        let result = config.validate();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Weather API timeout must be between")
        );
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = CepWeatherConfig::default();
        config.postal.base_url = "brasilapi.com.br".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Postal API base URL"));
    }
}
