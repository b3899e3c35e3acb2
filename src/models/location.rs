//! Location model for the named coordinates the dashboards are built for

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A named point from the coordinates file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Location name as shown on the dashboard and matched against warning areas
    pub name: String,
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Parse a JSON array of `{name, lat, lon}` objects
pub fn parse_locations(json: &str) -> crate::Result<Vec<Location>> {
    let locations: Vec<Location> =
        serde_json::from_str(json).map_err(|e| DashboardError::locations(e.to_string()))?;

    for location in &locations {
        if !(-90.0..=90.0).contains(&location.latitude)
            || !(-180.0..=180.0).contains(&location.longitude)
        {
            return Err(DashboardError::locations(format!(
                "'{}' has out-of-range coordinates ({})",
                location.name,
                location.format_coordinates()
            )));
        }
    }

    Ok(locations)
}

/// Read the coordinates file once at startup
pub fn load_locations(path: impl AsRef<Path>) -> crate::Result<Vec<Location>> {
    let path = path.as_ref();
    debug!("Reading coordinates from {}", path.display());

    let json = std::fs::read_to_string(path).map_err(|e| {
        DashboardError::locations(format!("cannot read {}: {e}", path.display()))
    })?;
    let locations = parse_locations(&json)?;

    info!("Loaded {} locations from {}", locations.len(), path.display());
    Ok(locations)
}
