//! Table dashboard: weather per location plus matched warnings

use super::{HEADING, escape, format_timestamp, page_head};
use crate::pipeline::TableReport;
use std::fmt::Write;

pub const NO_WARNINGS: &str = "Inga varningar just nu.";

#[must_use]
pub fn render(report: &TableReport) -> String {
    let mut html = page_head("");

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<body>
    <h1>{HEADING}</h1>
    <p>Senast uppdaterad: {}</p>

    <table>
        <tr>
            <th>Plats</th>
            <th>Temperatur (°C)</th>
            <th>Nederbörd (mm)</th>
            <th>Markfuktighet</th>
        </tr>
"#,
        format_timestamp(&report.generated_at)
    );

    for row in &report.rows {
        let _ = write!(
            html,
            "<tr>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
    </tr>
",
            escape(&row.name),
            row.temperature,
            row.precipitation,
            row.soil_moisture
        );
    }
    html.push_str("</table>\n");

    if report.alerts.is_empty() {
        let _ = writeln!(html, "<p>{NO_WARNINGS}</p>");
    } else {
        html.push_str(
            "<h2>Aktuella varningar</h2>\n<table>\n<tr><th>Plats</th><th>Typ av varning</th></tr>\n",
        );
        for alert in &report.alerts {
            let _ = writeln!(
                html,
                "<tr class='warning'><td>{}</td><td>{}</td></tr>",
                escape(&alert.location),
                escape(&alert.event)
            );
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body></html>");
    html
}
