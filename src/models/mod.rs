//! Data models for the dashboard generator
//!
//! This module contains the domain models organized by concern:
//! - Location: named coordinates from the coordinates file
//! - Weather: extracted readings and per-location table rows
//! - Alert: weather warnings and their matches against locations
//! - Hydrology: rainfall and groundwater observations

pub mod alert;
pub mod hydrology;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use alert::{Alert, AlertArea, AlertInfo, MatchedAlert};
pub use hydrology::{GroundwaterObservation, RainfallObservation};
pub use location::{Location, load_locations, parse_locations};
pub use weather::{Reading, WeatherRow, WeatherSnapshot};
