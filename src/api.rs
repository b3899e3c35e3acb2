//! HTTP access to the open-data services
//!
//! [`JsonFetcher`] is the seam between the pipeline and the network: the
//! production [`HttpFetcher`] issues one blocking GET per call, tests plug in
//! a canned fetcher. [`SmhiClient`] turns raw documents into typed data, one
//! call per data source, each with its own `Result` so a failing source never
//! takes the others down.

use crate::config::SourcesConfig;
use crate::models::{Alert, GroundwaterObservation, Location, RainfallObservation};
use anyhow::Context;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Why a data source produced nothing usable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure
    #[error("request failed: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// Body was not valid JSON
    #[error("response is not valid JSON: {0}")]
    Decode(String),

    /// Body was JSON `null` or an empty collection
    #[error("response contained no data")]
    Empty,

    /// JSON was valid but not shaped as expected
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Something that can GET a URL and hand back parsed JSON
pub trait JsonFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;

    /// Collapse every failure into `None`; the caller treats that as
    /// "no data for this source".
    fn fetch(&self, url: &str) -> Option<Value> {
        match self.fetch_json(url) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url, "Fetch failed: {}", e);
                None
            }
        }
    }
}

impl<F: JsonFetcher + ?Sized> JsonFetcher for &F {
    fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).fetch_json(url)
    }
}

/// Blocking reqwest-based fetcher with a per-request timeout
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the shared HTTP client
    pub fn new(sources: &SourcesConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(sources.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(sources.user_agent.as_str())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl JsonFetcher for HttpFetcher {
    #[instrument(skip(self))]
    fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().map_err(|e| {
            warn!("Network error after {:.3}s: {}", start_time.elapsed().as_secs_f64(), e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let value: Value = response
            .json()
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!("Slow API response: {:.3}s", total_duration.as_secs_f64());
        }

        if value.is_null() {
            return Err(FetchError::Empty);
        }
        Ok(value)
    }
}

/// Fully resolved endpoint templates
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    /// Forecast URL with `{lat}` and `{lon}` placeholders
    pub forecast: String,
    pub alerts: String,
    /// Rainfall URL with a `{station}` placeholder
    pub rainfall: String,
    pub groundwater: String,
}

impl Endpoints {
    #[must_use]
    pub fn forecast_url(&self, location: &Location) -> String {
        self.forecast
            .replace("{lat}", &location.latitude.to_string())
            .replace("{lon}", &location.longitude.to_string())
    }

    #[must_use]
    pub fn rainfall_url(&self, station: &str) -> String {
        self.rainfall.replace("{station}", station)
    }
}

impl From<&SourcesConfig> for Endpoints {
    fn from(sources: &SourcesConfig) -> Self {
        Self {
            forecast: sources.forecast_url.clone(),
            alerts: sources.alerts_url.clone(),
            rainfall: sources.rainfall_url.clone(),
            groundwater: sources.groundwater_url.clone(),
        }
    }
}

/// Typed access to the four data sources
pub struct SmhiClient<F> {
    fetcher: F,
    endpoints: Endpoints,
}

impl<F: JsonFetcher> SmhiClient<F> {
    pub fn new(fetcher: F, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Raw forecast document for one location
    #[instrument(skip(self, location), fields(location = %location.name))]
    pub fn forecast(&self, location: &Location) -> Result<Value, FetchError> {
        let url = self.endpoints.forecast_url(location);
        debug!("Requesting forecast for {} ({})", location.name, location.format_coordinates());
        self.fetcher.fetch_json(&url)
    }

    /// All current warnings.
    ///
    /// Entries that do not look like an alert object are logged and skipped;
    /// the rest are kept.
    #[instrument(skip(self))]
    pub fn alerts(&self) -> Result<Vec<Alert>, FetchError> {
        let value = self.fetcher.fetch_json(&self.endpoints.alerts)?;
        let Value::Array(entries) = value else {
            return Err(FetchError::Shape("alerts feed is not a JSON array".into()));
        };

        let total = entries.len();
        let alerts: Vec<Alert> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Alert>(entry) {
                Ok(alert) => Some(alert),
                Err(e) => {
                    warn!("Skipping malformed alert #{}: {}", index, e);
                    None
                }
            })
            .collect();

        info!("Received {} alerts ({} usable)", total, alerts.len());
        Ok(alerts)
    }

    /// Most recent `points` rainfall observations for a station, oldest first
    #[instrument(skip(self))]
    pub fn rainfall(
        &self,
        station: &str,
        points: usize,
    ) -> Result<Vec<RainfallObservation>, FetchError> {
        let value = self.fetcher.fetch_json(&self.endpoints.rainfall_url(station))?;
        let series = metobs::parse_rainfall(value)?;

        let skip = series.len().saturating_sub(points);
        let series: Vec<RainfallObservation> = series.into_iter().skip(skip).collect();
        info!("Received {} rainfall observations for station {}", series.len(), station);
        Ok(series)
    }

    /// The single latest groundwater observation
    #[instrument(skip(self))]
    pub fn groundwater(&self) -> Result<GroundwaterObservation, FetchError> {
        let value = self.fetcher.fetch_json(&self.endpoints.groundwater)?;
        let observation = groundwater::parse_latest(value)?;
        info!(
            "Latest groundwater level at {}: {} cm below surface ({})",
            observation.station, observation.level_cm_below_surface, observation.observed
        );
        Ok(observation)
    }
}

/// Station observation feed (`value[]` with epoch-millisecond dates)
mod metobs {
    use super::FetchError;
    use crate::models::RainfallObservation;
    use chrono::DateTime;
    use serde::Deserialize;
    use serde_json::Value;
    use tracing::debug;

    #[derive(Debug, Deserialize)]
    struct ObservationResponse {
        #[serde(default)]
        value: Vec<ObservationValue>,
    }

    #[derive(Debug, Deserialize)]
    struct ObservationValue {
        date: i64,
        value: Value,
    }

    impl ObservationValue {
        // The feed publishes amounts as decimal strings; accept plain numbers too.
        fn millimetres(&self) -> Option<f64> {
            match &self.value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
        }
    }

    pub(super) fn parse_rainfall(value: Value) -> Result<Vec<RainfallObservation>, FetchError> {
        let response: ObservationResponse =
            serde_json::from_value(value).map_err(|e| FetchError::Shape(e.to_string()))?;

        let mut series: Vec<RainfallObservation> = response
            .value
            .iter()
            .filter_map(|entry| {
                let time = DateTime::from_timestamp_millis(entry.date);
                let millimetres = entry.millimetres();
                if time.is_none() || millimetres.is_none() {
                    debug!("Skipping unparsable rainfall entry: {:?}", entry);
                }
                Some(RainfallObservation {
                    time: time?,
                    millimetres: millimetres?,
                })
            })
            .collect();

        if series.is_empty() {
            return Err(FetchError::Empty);
        }
        series.sort_by_key(|o| o.time);
        Ok(series)
    }
}

/// Groundwater level feed (GeoJSON feature collection, newest first)
mod groundwater {
    use super::FetchError;
    use crate::models::GroundwaterObservation;
    use chrono::NaiveDate;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Debug, Deserialize)]
    struct FeatureCollection {
        #[serde(default)]
        features: Vec<Feature>,
    }

    #[derive(Debug, Deserialize)]
    struct Feature {
        properties: LevelProperties,
    }

    #[derive(Debug, Deserialize)]
    struct LevelProperties {
        #[serde(alias = "platsbeteckning")]
        provplatsid: String,
        obsdatum: String,
        #[serde(alias = "grundvattenniva_cm_u_mark")]
        grundvattenniva_cm_u_markyta: f64,
    }

    pub(super) fn parse_latest(value: Value) -> Result<GroundwaterObservation, FetchError> {
        let collection: FeatureCollection =
            serde_json::from_value(value).map_err(|e| FetchError::Shape(e.to_string()))?;
        let feature = collection
            .features
            .into_iter()
            .next()
            .ok_or(FetchError::Empty)?;
        let props = feature.properties;

        // Dates come either bare or as full timestamps; the day is enough.
        let day = props.obsdatum.get(..10).unwrap_or(&props.obsdatum);
        let observed = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|e| FetchError::Shape(format!("bad obsdatum '{}': {e}", props.obsdatum)))?;

        Ok(GroundwaterObservation {
            station: props.provplatsid,
            observed,
            level_cm_below_surface: props.grundvattenniva_cm_u_markyta,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    /// Canned responses keyed by URL; unknown URLs answer 404.
    #[derive(Default)]
    pub(crate) struct StubFetcher {
        pub responses: HashMap<String, Result<Value, FetchError>>,
    }

    impl StubFetcher {
        pub fn with(mut self, url: &str, response: Result<Value, FetchError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }
    }

    impl JsonFetcher for StubFetcher {
        fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            self.responses
                .get(url)
                .cloned()
                .unwrap_or(Err(FetchError::Status(404)))
        }
    }

    pub(crate) fn endpoints() -> Endpoints {
        Endpoints {
            forecast: "https://fc.test/lon/{lon}/lat/{lat}".into(),
            alerts: "https://alerts.test".into(),
            rainfall: "https://obs.test/station/{station}".into(),
            groundwater: "https://gw.test".into(),
        }
    }

    #[test]
    fn test_forecast_url_substitution() {
        let url = endpoints().forecast_url(&Location::new("Borås", 57.721, 12.9401));
        assert_eq!(url, "https://fc.test/lon/12.9401/lat/57.721");
    }

    #[test]
    fn test_fetch_collapses_errors_to_none() {
        let stub = StubFetcher::default()
            .with("https://ok.test", Ok(json!({"a": 1})))
            .with("https://down.test", Err(FetchError::Transport("refused".into())));

        assert_eq!(stub.fetch("https://ok.test"), Some(json!({"a": 1})));
        assert_eq!(stub.fetch("https://down.test"), None);
        assert_eq!(stub.fetch("https://missing.test"), None);
    }

    #[test]
    fn test_alerts_skips_malformed_entries() {
        let stub = StubFetcher::default().with(
            "https://alerts.test",
            Ok(json!([
                {"info": [{"event": "Kuling", "area": [{"areaDesc": "Kungälv"}]}]},
                {"info": "not a list"},
                {}
            ])),
        );
        let client = SmhiClient::new(stub, endpoints());

        let alerts = client.alerts().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].info[0].event.as_deref(), Some("Kuling"));
    }

    #[test]
    fn test_alerts_rejects_non_array() {
        let stub = StubFetcher::default().with("https://alerts.test", Ok(json!({"alerts": []})));
        let client = SmhiClient::new(stub, endpoints());

        assert!(matches!(client.alerts(), Err(FetchError::Shape(_))));
    }

    #[test]
    fn test_rainfall_parses_and_trims() {
        let stub = StubFetcher::default().with(
            "https://obs.test/station/71420",
            Ok(json!({
                "value": [
                    {"date": 1_727_769_600_000_i64, "value": "0.4", "quality": "G"},
                    {"date": 1_727_762_400_000_i64, "value": "1.2", "quality": "G"},
                    {"date": 1_727_766_000_000_i64, "value": "", "quality": "Y"},
                    {"date": 1_727_773_200_000_i64, "value": 0.0, "quality": "G"}
                ]
            })),
        );
        let client = SmhiClient::new(stub, endpoints());

        let series = client.rainfall("71420", 2).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series[0].time < series[1].time);
        assert_eq!(series[0].millimetres, 0.4);
        assert_eq!(series[1].millimetres, 0.0);
    }

    #[test]
    fn test_rainfall_without_values_is_empty() {
        let stub = StubFetcher::default()
            .with("https://obs.test/station/1", Ok(json!({"value": []})));
        let client = SmhiClient::new(stub, endpoints());

        assert_eq!(client.rainfall("1", 24), Err(FetchError::Empty));
    }

    #[test]
    fn test_groundwater_latest() {
        let stub = StubFetcher::default().with(
            "https://gw.test",
            Ok(json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {
                        "provplatsid": "82_3",
                        "obsdatum": "2024-09-30T00:00:00Z",
                        "grundvattenniva_cm_u_markyta": 187.0
                    }
                }]
            })),
        );
        let client = SmhiClient::new(stub, endpoints());

        let obs = client.groundwater().unwrap();
        assert_eq!(obs.station, "82_3");
        assert_eq!(obs.observed, chrono::NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
        assert_eq!(obs.level_cm_below_surface, 187.0);
    }

    #[test]
    fn test_groundwater_failures_are_errors_not_panics() {
        let stub = StubFetcher::default()
            .with("https://gw.test", Ok(json!({"features": []})));
        let client = SmhiClient::new(stub, endpoints());
        assert_eq!(client.groundwater(), Err(FetchError::Empty));

        let stub = StubFetcher::default()
            .with("https://gw.test", Ok(json!({"features": [{"properties": {}}]})));
        let client = SmhiClient::new(stub, endpoints());
        assert!(matches!(client.groundwater(), Err(FetchError::Shape(_))));
    }
}
