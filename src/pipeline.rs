//! Dashboard pipeline
//!
//! Stages run strictly in order, one request at a time:
//! locations → per-location forecast → alerts → correlation → (rainfall,
//! groundwater) → report → HTML file. Every data source fails on its own;
//! the only fatal errors are a bad coordinates file and an unwritable output.

use crate::api::{FetchError, JsonFetcher, SmhiClient};
use crate::config::ChartsConfig;
use crate::correlate::match_alerts;
use crate::extract::extract;
use crate::models::{
    GroundwaterObservation, Location, MatchedAlert, RainfallObservation, WeatherRow,
};
use crate::render;
use chrono::{Local, NaiveDateTime};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Which page to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    Table,
    Charts,
}

/// Everything the table dashboard shows
#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub generated_at: NaiveDateTime,
    pub rows: Vec<WeatherRow>,
    pub alerts: Vec<MatchedAlert>,
}

/// Everything the chart dashboard shows
#[derive(Debug, Clone, PartialEq)]
pub struct ChartReport {
    pub generated_at: NaiveDateTime,
    pub rows: Vec<WeatherRow>,
    pub rainfall_station: String,
    pub rainfall: Result<Vec<RainfallObservation>, FetchError>,
    pub groundwater: Result<GroundwaterObservation, FetchError>,
}

/// Builds reports from the open-data sources
pub struct Dashboard<F> {
    client: SmhiClient<F>,
    charts: ChartsConfig,
}

impl<F: JsonFetcher> Dashboard<F> {
    pub fn new(client: SmhiClient<F>, charts: ChartsConfig) -> Self {
        Self { client, charts }
    }

    /// One row per location, in input order. A failed fetch yields a
    /// placeholder row instead of dropping the location.
    pub fn weather_rows(&self, locations: &[Location]) -> Vec<WeatherRow> {
        let start_time = Instant::now();

        let rows: Vec<WeatherRow> = locations
            .iter()
            .map(|location| match self.client.forecast(location) {
                Ok(document) => WeatherRow::new(&location.name, extract(&document)),
                Err(e) => {
                    warn!("No forecast for {}: {}", location.name, e);
                    WeatherRow::unavailable(&location.name)
                }
            })
            .collect();

        let missing = rows.iter().filter(|r| r.is_placeholder()).count();
        info!(
            "Collected weather for {} locations in {:.3}s ({} without data)",
            rows.len(),
            start_time.elapsed().as_secs_f64(),
            missing
        );
        rows
    }

    /// Warnings that name one of the locations. An unreachable alerts feed
    /// is treated as "no warnings".
    pub fn matched_alerts(&self, locations: &[Location]) -> Vec<MatchedAlert> {
        let alerts = self.client.alerts().unwrap_or_else(|e| {
            warn!("Alerts unavailable, assuming none: {}", e);
            Vec::new()
        });

        let matched = match_alerts(&alerts, locations);
        info!("{} warning matches across {} alerts", matched.len(), alerts.len());
        matched
    }

    pub fn table_report(&self, locations: &[Location]) -> TableReport {
        TableReport {
            generated_at: Local::now().naive_local(),
            rows: self.weather_rows(locations),
            alerts: self.matched_alerts(locations),
        }
    }

    pub fn chart_report(&self, locations: &[Location]) -> ChartReport {
        let rows = self.weather_rows(locations);

        let station = &self.charts.rainfall_station;
        let rainfall = self.client.rainfall(station, self.charts.rainfall_points);
        if let Err(e) = &rainfall {
            warn!("Rainfall for station {} unavailable: {}", station, e);
        }

        let groundwater = self.client.groundwater();
        if let Err(e) = &groundwater {
            warn!("Groundwater observation unavailable: {}", e);
        }

        ChartReport {
            generated_at: Local::now().naive_local(),
            rows,
            rainfall_station: station.clone(),
            rainfall,
            groundwater,
        }
    }

    /// Build, render and write one dashboard
    pub fn generate(
        &self,
        kind: DashboardKind,
        locations: &[Location],
        output: &Path,
    ) -> crate::Result<()> {
        let html = match kind {
            DashboardKind::Table => render::table::render(&self.table_report(locations)),
            DashboardKind::Charts => render::charts::render(&self.chart_report(locations))?,
        };

        render::write_html(output, &html)?;
        info!("Wrote {:?} dashboard to {}", kind, output.display());
        Ok(())
    }
}
