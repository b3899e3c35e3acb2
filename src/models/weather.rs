//! Weather readings and the per-location rows of the table dashboard

use serde::{Serialize, Serializer};
use std::fmt;

/// Text shown wherever a reading could not be obtained
pub const PLACEHOLDER: &str = "–";

/// A single numeric reading that may be missing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reading {
    Value(f64),
    #[default]
    Unavailable,
}

impl Reading {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Reading::Value(_))
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Reading::Unavailable, Reading::Value)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => write!(f, "{v}"),
            Reading::Unavailable => f.write_str(PLACEHOLDER),
        }
    }
}

// Charts want `null` for gaps, not the placeholder glyph.
impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// The three readings pulled out of a forecast document
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WeatherSnapshot {
    /// Air temperature in Celsius (`t`)
    pub temperature: Reading,
    /// Mean precipitation intensity in mm/h (`pmean`)
    pub precipitation: Reading,
    /// Surface soil moisture (`sfcsoilmoisture`)
    pub soil_moisture: Reading,
}

impl WeatherSnapshot {
    /// Snapshot with every reading missing
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// One row of the weather table; exactly one per location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRow {
    pub name: String,
    pub temperature: Reading,
    pub precipitation: Reading,
    pub soil_moisture: Reading,
}

impl WeatherRow {
    #[must_use]
    pub fn new(name: impl Into<String>, snapshot: WeatherSnapshot) -> Self {
        Self {
            name: name.into(),
            temperature: snapshot.temperature,
            precipitation: snapshot.precipitation,
            soil_moisture: snapshot.soil_moisture,
        }
    }

    /// Row for a location whose forecast could not be fetched
    #[must_use]
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self::new(name, WeatherSnapshot::unavailable())
    }

    /// True when no reading at all is available
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        !self.temperature.is_available()
            && !self.precipitation.is_available()
            && !self.soil_moisture.is_available()
    }
}
