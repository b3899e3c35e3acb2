//! Pulls the dashboard readings out of a point-forecast document.
//!
//! The document is a `timeSeries` array; each step carries a `parameters`
//! array of `{name, values}` objects. Only the first step and the first value
//! of each parameter are used.
//!
//! Extraction is all-or-nothing on structure: if the document is not shaped
//! as above, every reading is unavailable. A parameter that is simply absent
//! only blanks its own reading.

use crate::models::{Reading, WeatherSnapshot};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

pub const TEMPERATURE: &str = "t";
pub const PRECIPITATION: &str = "pmean";
pub const SOIL_MOISTURE: &str = "sfcsoilmoisture";

#[derive(Error, Debug, PartialEq)]
pub enum ExtractError {
    #[error("forecast document is malformed: {0}")]
    Malformed(String),
    #[error("forecast time series is empty")]
    EmptySeries,
    #[error("parameter '{0}' has no values")]
    NoValues(String),
}

#[derive(Debug, Deserialize)]
struct ForecastDocument {
    #[serde(rename = "timeSeries")]
    time_series: Vec<TimeStep>,
}

#[derive(Debug, Deserialize)]
struct TimeStep {
    parameters: Vec<Parameter>,
}

#[derive(Debug, Deserialize)]
struct Parameter {
    name: String,
    values: Vec<f64>,
}

/// Extract readings, falling back to an all-unavailable snapshot on any
/// structural problem.
#[must_use]
pub fn extract(document: &Value) -> WeatherSnapshot {
    match try_extract(document) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            debug!("Using placeholders: {}", e);
            WeatherSnapshot::unavailable()
        }
    }
}

/// Strict variant of [`extract`] that reports why extraction failed
pub fn try_extract(document: &Value) -> Result<WeatherSnapshot, ExtractError> {
    let document = ForecastDocument::deserialize(document)
        .map_err(|e| ExtractError::Malformed(e.to_string()))?;

    let first = document
        .time_series
        .into_iter()
        .next()
        .ok_or(ExtractError::EmptySeries)?;

    let mut values = HashMap::with_capacity(first.parameters.len());
    for parameter in first.parameters {
        let value = *parameter
            .values
            .first()
            .ok_or_else(|| ExtractError::NoValues(parameter.name.clone()))?;
        values.insert(parameter.name, value);
    }

    let reading = |name: &str| Reading::from(values.get(name).copied());
    Ok(WeatherSnapshot {
        temperature: reading(TEMPERATURE),
        precipitation: reading(PRECIPITATION),
        soil_moisture: reading(SOIL_MOISTURE),
    })
}
