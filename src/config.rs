//! Application configuration management.
//!
//! This module handles loading, parsing, and validating the application
//! configuration from TOML files with support for runtime overrides from
//! CLI arguments.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

/// Longest selectable history window (one week, matches the server clamp)
pub const MAX_WINDOW_HOURS: u32 = 168;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telemetry server connection
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Dashboard behaviour
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
    #[serde(default = "default_refresh")]
    pub refresh_secs: u64,
    #[serde(default = "default_point_budget")]
    pub point_budget: usize,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_true")]
    pub colored: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_window_hours() -> u32 {
    24
}

fn default_refresh() -> u64 {
    5
}

fn default_point_budget() -> usize {
    crate::view::DEFAULT_BUDGET
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            refresh_secs: default_refresh(),
            point_budget: default_point_budget(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            colored: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadError)?;

        let config: AppConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                message: "cannot be empty".to_string(),
            }
            .into());
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                message: "must start with http:// or https://".to_string(),
            }
            .into());
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.dashboard.window_hours == 0 || self.dashboard.window_hours > MAX_WINDOW_HOURS {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.window_hours".to_string(),
                message: format!("must be between 1 and {}", MAX_WINDOW_HOURS),
            }
            .into());
        }

        if self.dashboard.refresh_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.refresh_secs".to_string(),
                message: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.dashboard.point_budget == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.point_budget".to_string(),
                message: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(url) = &cli.server {
            self.api.base_url = url.clone();
        }

        if let Some(hours) = cli.hours {
            self.dashboard.window_hours = hours;
        }

        if let Some(secs) = cli.refresh_secs {
            self.dashboard.refresh_secs = secs;
        }

        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }

        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
    }
}
