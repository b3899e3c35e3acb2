//! End-to-end tests for the dashboard pipeline with canned HTTP responses

use rstest::rstest;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io::Write;
use vgdash::config::ChartsConfig;
use vgdash::models::load_locations;
use vgdash::{Dashboard, DashboardKind, Endpoints, FetchError, JsonFetcher, SmhiClient};

/// Canned responses keyed by URL; every other URL fails like a dead network.
#[derive(Default)]
struct CannedFetcher {
    responses: HashMap<String, Value>,
}

impl CannedFetcher {
    fn with(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }
}

impl JsonFetcher for CannedFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("no route to {url}")))
    }
}

fn endpoints() -> Endpoints {
    Endpoints {
        forecast: "https://forecast.test/{lat}/{lon}".into(),
        alerts: "https://alerts.test/alerts.json".into(),
        rainfall: "https://obs.test/{station}.json".into(),
        groundwater: "https://gw.test/latest".into(),
    }
}

fn coordinates_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn dashboard(fetcher: CannedFetcher) -> Dashboard<CannedFetcher> {
    Dashboard::new(
        SmhiClient::new(fetcher, endpoints()),
        ChartsConfig {
            rainfall_station: "71420".into(),
            rainfall_points: 24,
        },
    )
}

fn count_placeholder_rows(html: &str) -> usize {
    html.matches("<td>–</td>\n        <td>–</td>\n        <td>–</td>")
        .count()
}

#[test]
fn test_all_sources_down_still_renders_placeholders() {
    let coordinates = coordinates_file(
        r#"[{"name": "Göteborg", "lat": 57.7089, "lon": 11.9746},
            {"name": "Borås", "lat": 57.721, "lon": 12.9401}]"#,
    );
    let locations = load_locations(coordinates.path()).unwrap();
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("dashboard.html");

    dashboard(CannedFetcher::default())
        .generate(DashboardKind::Table, &locations, &output)
        .unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert_eq!(count_placeholder_rows(&html), 2);
    assert!(html.contains("<td>Göteborg</td>"));
    assert!(html.contains("<td>Borås</td>"));
    assert!(html.contains("Inga varningar just nu."));
}

#[test]
fn test_table_dashboard_with_data_and_warnings() {
    let locations = load_locations(
        coordinates_file(
            r#"[{"name": "Mölndal", "lat": 57.6554, "lon": 12.0138},
                {"name": "Uddevalla", "lat": 58.3498, "lon": 11.9424}]"#,
        )
        .path(),
    )
    .unwrap();

    let fetcher = CannedFetcher::default()
        .with(
            "https://forecast.test/57.6554/12.0138",
            json!({"timeSeries": [{"validTime": "2024-10-01T07:00:00Z", "parameters": [
                {"name": "t", "values": [12.5]},
                {"name": "pmean", "values": [0.3]}
            ]}]}),
        )
        .with(
            "https://alerts.test/alerts.json",
            json!([
                {"info": [{"event": "Kuling", "area": [{"areaDesc": "Göteborg och Mölndal"}]}]},
                {"info": [{"event": "Höga flöden", "area": [{"areaDesc": "mölndalsån"}]}]}
            ]),
        );

    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("dashboard.html");
    dashboard(fetcher)
        .generate(DashboardKind::Table, &locations, &output)
        .unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<td>Mölndal</td>\n        <td>12.5</td>\n        <td>0.3</td>\n        <td>–</td>"));
    assert_eq!(count_placeholder_rows(&html), 1);
    assert!(html.contains("<tr class='warning'><td>Mölndal</td><td>Kuling</td></tr>"));
    assert!(html.contains("<tr class='warning'><td>Mölndal</td><td>Höga flöden</td></tr>"));
    assert!(!html.contains("Inga varningar just nu."));
}

#[test]
fn test_chart_dashboard_survives_groundwater_failure() {
    let locations = load_locations(
        coordinates_file(r#"[{"name": "Göteborg", "lat": 57.7089, "lon": 11.9746}]"#).path(),
    )
    .unwrap();

    let fetcher = CannedFetcher::default().with(
        "https://obs.test/71420.json",
        json!({"value": [
            {"date": 1_727_762_400_000_i64, "value": "1.2", "quality": "G"},
            {"date": 1_727_766_000_000_i64, "value": "0.3", "quality": "G"}
        ]}),
    );

    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("charts.html");
    dashboard(fetcher)
        .generate(DashboardKind::Charts, &locations, &output)
        .unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("\"temperature\":[null]"));
    assert!(html.contains("Summa: 1.5 mm över 2 mätningar"));
    assert!(html.contains("Grundvattendata saknas"));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
fn test_row_count_matches_location_count(#[case] n: usize) {
    let entries: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"name": "Plats {i}", "lat": 57.{i}, "lon": 12.{i}}}"#))
        .collect();
    let locations =
        load_locations(coordinates_file(&format!("[{}]", entries.join(","))).path()).unwrap();

    let report = dashboard(CannedFetcher::default()).table_report(&locations);
    assert_eq!(report.rows.len(), n);
    for (i, row) in report.rows.iter().enumerate() {
        assert_eq!(row.name, format!("Plats {i}"));
        assert!(row.is_placeholder());
    }
}

#[test]
fn test_bad_coordinates_file_is_fatal() {
    let file = coordinates_file("not json");
    assert!(load_locations(file.path()).is_err());
}
