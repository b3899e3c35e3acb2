//! Configuration management for the dashboard generator
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Open-data endpoints and HTTP settings
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Input and output files
    #[serde(default)]
    pub paths: PathsConfig,
    /// Chart dashboard settings
    #[serde(default)]
    pub charts: ChartsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Open-data endpoints and HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Point forecast URL; `{lat}` and `{lon}` are substituted per location
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Weather warnings feed
    #[serde(default = "default_alerts_url")]
    pub alerts_url: String,
    /// Station rainfall observations; `{station}` is substituted
    #[serde(default = "default_rainfall_url")]
    pub rainfall_url: String,
    /// Latest groundwater level observation
    #[serde(default = "default_groundwater_url")]
    pub groundwater_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Input and output files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON array of `{name, lat, lon}`
    #[serde(default = "default_coordinates_file")]
    pub coordinates_file: PathBuf,
    /// Where the table dashboard is written
    #[serde(default = "default_table_output")]
    pub table_output: PathBuf,
    /// Where the chart dashboard is written
    #[serde(default = "default_charts_output")]
    pub charts_output: PathBuf,
}

/// Chart dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Observation station for the rainfall series
    #[serde(default = "default_rainfall_station")]
    pub rainfall_station: String,
    /// Number of most recent rainfall observations to plot
    #[serde(default = "default_rainfall_points")]
    pub rainfall_points: usize,
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
fn default_forecast_url() -> String {
    "https://opendata-download-metfcst.smhi.se/api/category/pmp3g/version/2/geotype/point/lon/{lon}/lat/{lat}/data.json".to_string()
}

fn default_alerts_url() -> String {
    "https://opendata.smhi.se/triangulering/alerts.json".to_string()
}

fn default_rainfall_url() -> String {
    "https://opendata-download-metobs.smhi.se/api/version/1.0/parameter/7/station/{station}/period/latest-months/data.json".to_string()
}

fn default_groundwater_url() -> String {
    "https://api.sgu.se/oppnadata/grundvattennivaer-observerade/ogc/features/v1/collections/nivaer/items?limit=1&sortby=-obsdatum".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    concat!("vgdash/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_coordinates_file() -> PathBuf {
    PathBuf::from("coordinates.json")
}

fn default_table_output() -> PathBuf {
    PathBuf::from("dashboard.html")
}

fn default_charts_output() -> PathBuf {
    PathBuf::from("charts.html")
}

fn default_rainfall_station() -> String {
    // Göteborg A
    "71420".to_string()
}

fn default_rainfall_points() -> usize {
    48
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            alerts_url: default_alerts_url(),
            rainfall_url: default_rainfall_url(),
            groundwater_url: default_groundwater_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            coordinates_file: default_coordinates_file(),
            table_output: default_table_output(),
            charts_output: default_charts_output(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            rainfall_station: default_rainfall_station(),
            rainfall_points: default_rainfall_points(),
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

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            paths: PathsConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let explicit = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|p| p.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if explicit && !config_file.exists() {
            return Err(DashboardError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. VGDASH__SOURCES__TIMEOUT_SECONDS=10
        builder = builder.add_source(
            Environment::with_prefix("VGDASH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vgdash").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.sources.forecast_url.is_empty() {
            self.sources.forecast_url = default_forecast_url();
        }
        if self.sources.alerts_url.is_empty() {
            self.sources.alerts_url = default_alerts_url();
        }
        if self.sources.rainfall_url.is_empty() {
            self.sources.rainfall_url = default_rainfall_url();
        }
        if self.sources.groundwater_url.is_empty() {
            self.sources.groundwater_url = default_groundwater_url();
        }
        if self.sources.timeout_seconds == 0 {
            self.sources.timeout_seconds = default_timeout();
        }
        if self.sources.user_agent.is_empty() {
            self.sources.user_agent = default_user_agent();
        }
        if self.paths.coordinates_file.as_os_str().is_empty() {
            self.paths.coordinates_file = default_coordinates_file();
        }
        if self.paths.table_output.as_os_str().is_empty() {
            self.paths.table_output = default_table_output();
        }
        if self.paths.charts_output.as_os_str().is_empty() {
            self.paths.charts_output = default_charts_output();
        }
        if self.charts.rainfall_station.is_empty() {
            self.charts.rainfall_station = default_rainfall_station();
        }
        if self.charts.rainfall_points == 0 {
            self.charts.rainfall_points = default_rainfall_points();
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
        self.validate_numeric_ranges()?;
        self.validate_urls()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.sources.timeout_seconds > 300 {
            return Err(DashboardError::config("Request timeout cannot exceed 300 seconds").into());
        }

        if self.charts.rainfall_points > 10_000 {
            return Err(
                DashboardError::config("Rainfall points cannot exceed 10000").into(),
            );
        }

        Ok(())
    }

    /// Validate endpoint URLs and their placeholders
    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("forecast_url", &self.sources.forecast_url),
            ("alerts_url", &self.sources.alerts_url),
            ("rainfall_url", &self.sources.rainfall_url),
            ("groundwater_url", &self.sources.groundwater_url),
        ];
        for (key, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "sources.{key} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        for placeholder in ["{lat}", "{lon}"] {
            if !self.sources.forecast_url.contains(placeholder) {
                return Err(DashboardError::config(format!(
                    "sources.forecast_url must contain {placeholder}"
                ))
                .into());
            }
        }

        if !self.sources.rainfall_url.contains("{station}") {
            return Err(
                DashboardError::config("sources.rainfall_url must contain {station}").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
