//! Report rendering.
//!
//! Statistics are flattened to one display string each and laid out as a
//! two-column grid, which is printed and persisted as a text file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::models::{Statistic, StatsReport};
use crate::storage::StorageError;

/// Flatten one statistic to its display string.
pub fn flatten(statistic: &Statistic) -> String {
    match statistic {
        Statistic::Scalar(value) => value.to_string(),
        Statistic::List(items) => items.join(", "),
        Statistic::NamedList(items) => items
            .iter()
            .map(|(label, count)| format!("('{}', {})", label, count))
            .collect::<Vec<_>>()
            .join(", "),
        Statistic::Table(rows) => rows
            .iter()
            .map(|row| format!("{} ({})", row.player, row.value))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Flatten every statistic of a report, keeping report order.
pub fn flatten_report(report: &StatsReport) -> Vec<(String, String)> {
    report
        .statistics
        .iter()
        .map(|s| (s.name.clone(), flatten(&s.statistic)))
        .collect()
}

/// Render `(name, value)` rows as a bordered two-column grid.
pub fn render_grid(rows: &[(String, String)]) -> String {
    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    let border = format!(
        "+{}+{}+",
        "-".repeat(name_width + 2),
        "-".repeat(value_width + 2)
    );

    let mut lines = Vec::with_capacity(rows.len() * 2 + 1);
    lines.push(border.clone());
    for (name, value) in rows {
        lines.push(format!(
            "| {:<nw$} | {:<vw$} |",
            name,
            value,
            nw = name_width,
            vw = value_width
        ));
        lines.push(border.clone());
    }
    lines.join("\n")
}

/// Flatten and render a report as a grid.
pub fn render_report(report: &StatsReport) -> String {
    render_grid(&flatten_report(report))
}

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &StatsReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Persist rendered report text, creating the parent directory if needed.
pub fn write_report(path: &Path, text: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    info!("Wrote statistics report to {:?}", path);
    Ok(())
}
