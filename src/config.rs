//! Configuration management for the Travel Buddy application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelBuddyError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Travel Buddy application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelBuddyConfig {
    /// Generative-AI provider configuration
    #[serde(default)]
    pub ai: AiConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Optional user database
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generative-AI provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Provider API key (`GOOGLE_API_KEY`)
    pub api_key: Option<String>,
    /// Base URL of the generative language API
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    /// Model identifier used for every request
    #[serde(default = "default_ai_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u32,
    /// Sampling temperature for chat replies
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Serve the built frontend from `static_dir` (production deployment)
    #[serde(default)]
    pub serve_static: bool,
    /// Directory holding the built frontend
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// User database settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; the in-memory store is used when absent
    pub url: Option<String>,
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

// Default value functions
fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_ai_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_ai_timeout() -> u32 {
    60
}

fn default_chat_temperature() -> f32 {
    0.7
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "dist/public".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            timeout_seconds: default_ai_timeout(),
            chat_temperature: default_chat_temperature(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            serve_static: false,
            static_dir: default_static_dir(),
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

impl TravelBuddyConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Nested overrides, e.g. TRAVELBUDDY__SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("TRAVELBUDDY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelBuddyConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_well_known_env();
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelbuddy").join("config.toml"))
    }

    /// Pick up the conventional variables deployments already set.
    fn apply_well_known_env(&mut self) {
        if self.ai.api_key.is_none() {
            self.ai.api_key = std::env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty());
        }
        if self.database.url.is_none() {
            self.database.url = std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.is_empty());
        }
        if let Ok(flag) = std::env::var("TRAVELBUDDY_SERVE_STATIC") {
            self.server.serve_static = matches!(flag.as_str(), "1" | "true" | "production");
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.ai.base_url.is_empty() {
            self.ai.base_url = default_ai_base_url();
        }
        if self.ai.model.is_empty() {
            self.ai.model = default_ai_model();
        }
        if self.ai.timeout_seconds == 0 {
            self.ai.timeout_seconds = default_ai_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The key is optional at load time so client-only commands work without it;
    /// the gateway refuses to start without one.
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.ai.api_key {
            if api_key.trim().is_empty() {
                return Err(TravelBuddyError::config(
                    "AI API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() > 200 {
                return Err(TravelBuddyError::config(
                    "AI API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.ai.timeout_seconds > 300 {
            return Err(TravelBuddyError::config("AI request timeout cannot exceed 300 seconds").into());
        }

        if !(0.0..=2.0).contains(&self.ai.chat_temperature) {
            return Err(TravelBuddyError::config("Chat temperature must be between 0.0 and 2.0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelBuddyError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelBuddyError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.ai.base_url.starts_with("http://") && !self.ai.base_url.starts_with("https://") {
            return Err(
                TravelBuddyError::config("AI base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if let Some(url) = &self.database.url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(TravelBuddyError::config(
                    "Database URL must start with postgres:// or postgresql://",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Socket address the server binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TravelBuddyConfig::default();
        assert_eq!(
            config.ai.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.ai.timeout_seconds, 60);
        assert_eq!(config.server.port, 5000);
        assert!(!config.server.serve_static);
        assert_eq!(config.logging.level, "info");
        assert!(config.ai.api_key.is_none());
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TravelBuddyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let mut config = TravelBuddyConfig::default();
        config.ai.api_key = Some("  ".to_string());
        let result = config.validate_api_key();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TravelBuddyConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TravelBuddyConfig::default();
        config.ai.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_database_url_scheme() {
        let mut config = TravelBuddyConfig::default();
        config.database.url = Some("mysql://localhost/db".to_string());
        assert!(config.validate().is_err());

        config.database.url = Some("postgres://localhost/travel".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = TravelBuddyConfig::default();
        config.ai.model = String::new();
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TravelBuddyConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("travelbuddy"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }

    #[test]
    fn test_bind_addr() {
        let config = TravelBuddyConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }
}
