//! `vgdash` - static weather dashboards for Västra Götaland
//!
//! Fetches point forecasts, weather warnings, rainfall observations and the
//! latest groundwater level from public open-data APIs, matches warnings to
//! a fixed list of named locations and renders the results as HTML pages.

pub mod api;
pub mod config;
pub mod correlate;
pub mod error;
pub mod extract;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;

// Re-export core types for public API
pub use api::{Endpoints, FetchError, HttpFetcher, JsonFetcher, SmhiClient};
pub use config::DashboardConfig;
pub use correlate::match_alerts;
pub use error::DashboardError;
pub use extract::extract;
pub use models::{Alert, Location, MatchedAlert, Reading, WeatherRow, WeatherSnapshot};
pub use pipeline::{ChartReport, Dashboard, DashboardKind, TableReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
