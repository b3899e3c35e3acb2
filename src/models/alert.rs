//! Weather warning records and their matches against named locations

use serde::{Deserialize, Serialize};

/// A public weather warning as published on the alerts feed.
///
/// Deserialization is lenient: absent collections become empty and absent
/// strings become `None`, so a sparse alert still takes part in matching.
/// Only the first `info` block is ever consulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Alert {
    #[serde(default)]
    pub info: Vec<AlertInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AlertInfo {
    /// Warning type, e.g. "Kuling" or "Höga flöden"
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub area: Vec<AlertArea>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AlertArea {
    /// Free-text description of the affected area
    #[serde(default, rename = "areaDesc")]
    pub area_desc: Option<String>,
}

impl Alert {
    /// The info block used for matching, if there is one
    #[must_use]
    pub fn primary_info(&self) -> Option<&AlertInfo> {
        self.info.first()
    }
}

impl AlertArea {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            area_desc: Some(description.into()),
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.area_desc.as_deref().unwrap_or_default()
    }
}

/// A location named in a warning area, paired with the warning type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedAlert {
    pub location: String,
    pub event: String,
}

impl MatchedAlert {
    #[must_use]
    pub fn new(location: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            event: event.into(),
        }
    }
}
