//! Rainfall and groundwater observations for the chart dashboard

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One rainfall measurement from an observation station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallObservation {
    /// End of the measurement period
    pub time: DateTime<Utc>,
    /// Precipitation amount in mm
    pub millimetres: f64,
}

impl RainfallObservation {
    /// Label used on the chart's time axis
    #[must_use]
    pub fn label(&self) -> String {
        self.time.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// The latest groundwater level reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundwaterObservation {
    /// Monitoring station identifier
    pub station: String,
    /// Date of the measurement
    pub observed: NaiveDate,
    /// Water level in centimetres below ground surface
    pub level_cm_below_surface: f64,
}

/// Sum of all rainfall in the series, in mm
#[must_use]
pub fn total_rainfall(series: &[RainfallObservation]) -> f64 {
    series.iter().map(|o| o.millimetres).sum()
}
