//! HTML output for the two dashboards
//!
//! Pages are assembled with `format!`/`write!` into a `String`; every piece
//! of fetched text goes through [`escape`] first.

pub mod charts;
pub mod table;

use chrono::NaiveDateTime;
use std::path::Path;
use tracing::debug;

pub const PAGE_TITLE: &str = "Västra Götalands väderdashboard";
pub const HEADING: &str = "Väderdata för Västra Götaland";

/// Escape text for use in element content and quoted attributes
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// "Last updated" stamp, minute precision
#[must_use]
pub fn format_timestamp(generated_at: &NaiveDateTime) -> String {
    generated_at.format("%Y-%m-%d %H:%M").to_string()
}

/// Overwrite `path` with the rendered page
pub fn write_html(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

fn page_head(extra: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="sv">
<head>
    <meta charset="UTF-8">
    <title>{PAGE_TITLE}</title>
    <style>
        body {{ font-family: sans-serif; }}
        table {{ border-collapse: collapse; width: 100%; margin-bottom: 2em; }}
        th, td {{ border: 1px solid #ccc; padding: 8px; text-align: center; }}
        th {{ background-color: #f0f0f0; }}
        .warning {{ background-color: #ffdddd; }}
        .chart {{ max-width: 900px; margin-bottom: 2em; }}
        .card {{ border: 1px solid #ccc; padding: 1em; max-width: 400px; }}
    </style>
{extra}</head>
"#
    )
}
