//! Error types and handling for the dashboard generator

use crate::api::FetchError;
use thiserror::Error;

/// Main error type for the dashboard generator
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A data source could not be fetched or decoded
    #[error("Fetch error: {source}")]
    Fetch {
        #[from]
        source: FetchError,
    },

    /// The coordinates file could not be read or parsed
    #[error("Invalid coordinates file: {message}")]
    Locations { message: String },

    /// HTML generation errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new coordinates-file error
    pub fn locations<S: Into<String>>(message: S) -> Self {
        Self::Locations {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file and VGDASH__ variables."
                    .to_string()
            }
            DashboardError::Fetch { .. } => {
                "Unable to reach the open-data services. Please check your internet connection."
                    .to_string()
            }
            DashboardError::Locations { message } => {
                format!("Could not load locations: {message}")
            }
            DashboardError::Render { message } => format!("Could not render dashboard: {message}"),
            DashboardError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = DashboardError::config("missing url");
        assert!(matches!(config_err, DashboardError::Config { .. }));

        let locations_err = DashboardError::locations("not an array");
        assert!(matches!(locations_err, DashboardError::Locations { .. }));

        let render_err = DashboardError::render("bad chart data");
        assert!(matches!(render_err, DashboardError::Render { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = DashboardError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let fetch_err: DashboardError = FetchError::Status(503).into();
        assert!(fetch_err.user_message().contains("Unable to reach"));

        let locations_err = DashboardError::locations("expected a JSON array");
        assert!(locations_err.user_message().contains("expected a JSON array"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashboardError = io_err.into();
        assert!(matches!(err, DashboardError::Io { .. }));
    }
}
