//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the segmentation/lookup code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::chart::HoverReadout;
use crate::chart::scale::format_count;
use crate::data::catalog::Catalog;
use crate::domain::{ChartConfig, Metric};
use crate::io::ingest::{IngestedData, RowError};

/// Row errors listed before the summary truncates.
const MAX_ROW_ERRORS: usize = 10;

/// Format the dataset summary (what was read, what is drawable).
pub fn format_dataset_summary(ingest: &IngestedData, catalog: &Catalog, config: &ChartConfig) -> String {
    let mut out = String::new();

    out.push_str("=== epicurve - daily epidemic curves ===\n");
    out.push_str(&format!("Data: {}\n", config.data_path.display()));
    out.push_str(&format!(
        "Rows: read={} | used={} | skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len(),
    ));
    out.push_str(&format!(
        "Dates: {} .. {}\n",
        ingest.stats.date_min, ingest.stats.date_max
    ));
    out.push_str(&format!(
        "Window: {} .. {}\n",
        config.window.start, config.window.end
    ));
    out.push_str(&format!(
        "Countries: {} in file | {} with cases >= {} in window\n",
        ingest.stats.countries,
        catalog.len(),
        format_count(config.cases_threshold),
    ));

    if !ingest.row_errors.is_empty() {
        out.push('\n');
        out.push_str(&format_row_errors(&ingest.row_errors));
    }

    out
}

/// List skipped rows (first few only).
pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::from("Skipped rows:\n");
    for e in errors.iter().take(MAX_ROW_ERRORS) {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    if errors.len() > MAX_ROW_ERRORS {
        out.push_str(&format!("  ... and {} more\n", errors.len() - MAX_ROW_ERRORS));
    }
    out
}

/// Table of drawable countries for one metric.
pub fn format_country_list(catalog: &Catalog, metric: Metric) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:<28} {:>8} {:>8} {:>10}\n",
            "id", "country", "segments", "points", "peak"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:->4} {:-<28} {:->8} {:->8} {:->10}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for c in catalog.countries() {
        let curve = c.curve(metric);
        let peak = curve.max_value().map(format_count).unwrap_or_else(|| "-".to_string());
        out.push_str(
            format!(
                "{:>4} {:<28} {:>8} {:>8} {:>10}\n",
                c.id,
                truncate(&c.name, 28),
                curve.segments.len(),
                curve.points.len(),
                peak,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Cursor readout: the date, then one line per country with a value.
pub fn format_hover(readout: &HoverReadout) -> String {
    let mut out = format!(
        "{} ({})\n",
        readout.date.format("%d %b %Y"),
        readout.metric.display_name()
    );
    if readout.readings.is_empty() {
        out.push_str("  (no data on this day)\n");
        return out;
    }
    for r in &readout.readings {
        out.push_str(&format!(
            "  {:<28} {:>10}\n",
            truncate(&r.name, 28),
            format_count(r.point.value)
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
