//! Chart dashboard: Chart.js bar and line charts plus a groundwater card

use super::{HEADING, escape, format_timestamp, page_head};
use crate::error::DashboardError;
use crate::models::hydrology::total_rainfall;
use crate::models::{RainfallObservation, Reading, WeatherRow};
use crate::pipeline::ChartReport;
use serde::Serialize;
use std::fmt::Write;

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4";

#[derive(Serialize)]
struct WeatherSeries<'a> {
    labels: Vec<&'a str>,
    temperature: Vec<Reading>,
    precipitation: Vec<Reading>,
}

impl<'a> From<&'a [WeatherRow]> for WeatherSeries<'a> {
    fn from(rows: &'a [WeatherRow]) -> Self {
        Self {
            labels: rows.iter().map(|r| r.name.as_str()).collect(),
            temperature: rows.iter().map(|r| r.temperature).collect(),
            precipitation: rows.iter().map(|r| r.precipitation).collect(),
        }
    }
}

#[derive(Serialize)]
struct RainfallSeries {
    labels: Vec<String>,
    millimetres: Vec<f64>,
}

impl From<&[RainfallObservation]> for RainfallSeries {
    fn from(series: &[RainfallObservation]) -> Self {
        Self {
            labels: series.iter().map(RainfallObservation::label).collect(),
            millimetres: series.iter().map(|o| o.millimetres).collect(),
        }
    }
}

/// Serialize for inline `<script>` use; `</` must not close the element early.
fn script_json<T: Serialize>(value: &T) -> crate::Result<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| DashboardError::render(format!("cannot serialize chart data: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}

pub fn render(report: &ChartReport) -> crate::Result<String> {
    let mut html = page_head(&format!("    <script src=\"{CHART_JS}\"></script>\n"));

    let _ = write!(
        html,
        r#"<body>
    <h1>{HEADING}</h1>
    <p>Senast uppdaterad: {}</p>

    <h2>Temperatur och nederbörd</h2>
    <div class="chart"><canvas id="weatherChart"></canvas></div>
"#,
        format_timestamp(&report.generated_at)
    );
    let weather = script_json(&WeatherSeries::from(report.rows.as_slice()))?;

    let _ = writeln!(
        html,
        "    <h2>Nederbörd vid station {}</h2>",
        escape(&report.rainfall_station)
    );
    let rainfall = match &report.rainfall {
        Ok(series) => {
            let _ = writeln!(
                html,
                "    <p>Summa: {:.1} mm över {} mätningar</p>\n    <div class=\"chart\"><canvas id=\"rainChart\"></canvas></div>",
                total_rainfall(series),
                series.len()
            );
            Some(script_json(&RainfallSeries::from(series.as_slice()))?)
        }
        Err(e) => {
            let _ = writeln!(
                html,
                "    <p>Nederbördsdata saknas ({}).</p>",
                escape(&e.to_string())
            );
            None
        }
    };

    html.push_str("    <h2>Grundvatten</h2>\n");
    match &report.groundwater {
        Ok(obs) => {
            let _ = writeln!(
                html,
                "    <div class=\"card\">\n        <p>Station: {}</p>\n        <p>Datum: {}</p>\n        <p>Nivå: {} cm under markytan</p>\n    </div>",
                escape(&obs.station),
                obs.observed.format("%Y-%m-%d"),
                obs.level_cm_below_surface
            );
        }
        Err(e) => {
            let _ = writeln!(
                html,
                "    <p>Grundvattendata saknas ({}).</p>",
                escape(&e.to_string())
            );
        }
    }

    let _ = write!(
        html,
        r#"    <script>
        const weather = {weather};
        new Chart(document.getElementById('weatherChart'), {{
            type: 'bar',
            data: {{
                labels: weather.labels,
                datasets: [
                    {{ label: 'Temperatur (°C)', data: weather.temperature }},
                    {{ label: 'Nederbörd (mm)', data: weather.precipitation }}
                ]
            }}
        }});
"#
    );
    if let Some(rainfall) = rainfall {
        let _ = write!(
            html,
            r#"        const rain = {rainfall};
        new Chart(document.getElementById('rainChart'), {{
            type: 'line',
            data: {{
                labels: rain.labels,
                datasets: [{{ label: 'Nederbörd (mm)', data: rain.millimetres }}]
            }}
        }});
"#
        );
    }
    html.push_str("    </script>\n</body></html>");

    Ok(html)
}
