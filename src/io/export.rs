//! Export the drawn segments to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per plotted point, tagged with the country, metric and segment index.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::ChartState;
use crate::data::catalog::Catalog;
use crate::domain::Metric;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct SegmentRow<'a> {
    country: &'a str,
    metric: Metric,
    segment: usize,
    date: NaiveDate,
    value: f64,
}

/// Write the selected countries' segments (current metric) to a CSV file.
pub fn write_segments_csv(path: &Path, catalog: &Catalog, state: &ChartState) -> Result<usize, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_segments(file, catalog, state)
}

/// Write segments to any writer; returns the number of data rows.
pub fn write_segments<W: Write>(out: W, catalog: &Catalog, state: &ChartState) -> Result<usize, AppError> {
    let mut writer = csv::Writer::from_writer(out);
    let mut rows = 0usize;

    for selection in state.selected() {
        let Some(country) = catalog.by_id(selection.country_id) else {
            continue;
        };
        for (segment, seg) in country.curve(state.metric).segments.iter().enumerate() {
            for p in &seg.points {
                writer
                    .serialize(SegmentRow {
                        country: &country.name,
                        metric: state.metric,
                        segment,
                        date: p.date,
                        value: p.value,
                    })
                    .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
                rows += 1;
            }
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::data::catalog::CatalogOptions;
    use crate::domain::{ChartWindow, Record};

    #[test]
    fn writes_one_row_per_point() {
        let day = |d| NaiveDate::from_ymd_opt(2020, 3, d).unwrap();
        let records: Vec<Record> = [(1, 12.0), (2, 3.0), (3, 40.0), (4, 41.0)]
            .into_iter()
            .map(|(d, v)| Record::new(day(d), "Italy").with_field("cases", v))
            .collect();
        let window = ChartWindow::new(day(1), day(31));
        let options = CatalogOptions {
            window,
            cases_threshold: 10.0,
            deaths_threshold: 1.0,
        };
        let catalog = Catalog::build(&records, &options).unwrap();
        let mut state = ChartState::new(Metric::Cases, window, Duration::hours(12));
        state.add(catalog.by_name("Italy").unwrap());

        let mut buf = Vec::new();
        let rows = write_segments(&mut buf, &catalog, &state).unwrap();
        assert_eq!(rows, 3);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "country,metric,segment,date,value");
        assert_eq!(lines[1], "Italy,cases,0,2020-03-01,12.0");
        assert_eq!(lines[3], "Italy,cases,1,2020-03-04,41.0");
    }
}
