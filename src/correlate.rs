//! Matches warning areas against the configured locations.
//!
//! A location matches an area when its lowercased name occurs anywhere in the
//! lowercased area description. There is no word-boundary check, so
//! "Lerum" also matches an area described as "Lerumsån".

use crate::models::{Alert, Location, MatchedAlert, weather::PLACEHOLDER};

/// Every (location, event) pair where the location's name appears in one of
/// the alert's areas.
///
/// Order is alerts, then areas, then locations. Duplicates are kept: a
/// location named in two areas or two alerts appears twice.
#[must_use]
pub fn match_alerts(alerts: &[Alert], locations: &[Location]) -> Vec<MatchedAlert> {
    let names: Vec<(String, &str)> = locations
        .iter()
        .map(|l| (l.name.to_lowercase(), l.name.as_str()))
        .collect();

    let mut matched = Vec::new();
    for alert in alerts {
        let Some(info) = alert.primary_info() else {
            continue;
        };
        let event = info.event.as_deref().unwrap_or(PLACEHOLDER);

        for area in &info.area {
            let description = area.description().to_lowercase();
            for (needle, name) in &names {
                if description.contains(needle.as_str()) {
                    matched.push(MatchedAlert::new(*name, event));
                }
            }
        }
    }
    matched
}
