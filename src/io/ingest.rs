//! CSV ingest and normalization.
//!
//! This module turns an ECDC-style daily report CSV into date-sorted `Record`s.
//!
//! Design goals:
//! - **Strict schema** for the key columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Lenient metrics**: a non-numeric counter is simply absent from the record
//! - **Separation of concerns**: no segmentation logic here

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::{ChartConfig, Record};
use crate::error::AppError;

/// Column names and date format of the input file.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub date_column: String,
    pub country_column: String,
    pub date_format: String,
}

impl IngestOptions {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            date_column: config.date_column.clone(),
            country_column: config.country_column.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

/// Summary stats about the records actually loaded.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub countries: usize,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: sorted records + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<Record>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a CSV file into date-sorted records.
pub fn load_records(path: &Path, options: &IngestOptions) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let data = read_records(file, options)?;
    info!(
        path = %path.display(),
        rows_read = data.rows_read,
        rows_used = data.rows_used,
        countries = data.stats.countries,
        "loaded dataset"
    );
    Ok(data)
}

/// Parse CSV from any reader (used by `load_records` and tests).
pub fn read_records<R: Read>(input: R, options: &IngestOptions) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let date_idx = require_column(&header_map, &options.date_column)?;
    let country_idx = require_column(&header_map, &options.country_column)?;

    // Every other column is a candidate metric.
    let metric_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != date_idx && *idx != country_idx)
        .map(|(idx, name)| (idx, normalize_header_name(name)))
        .collect();

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let row = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&row, date_idx, country_idx, &metric_columns, &options.date_format) {
            Ok(record) => records.push(record),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if !row_errors.is_empty() {
        warn!(count = row_errors.len(), "skipped malformed CSV rows");
    }

    // Stable: same-date rows keep file order.
    records.sort_by_key(|r| r.date);

    let rows_used = records.len();
    let stats = compute_stats(&records)
        .ok_or_else(|| AppError::new(3, "No valid rows remain after parsing the CSV."))?;

    Ok(IngestedData {
        records,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn require_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map.get(name).copied().ok_or_else(|| {
        let mut known: Vec<&str> = header_map.keys().map(String::as_str).collect();
        known.sort_unstable();
        AppError::new(
            2,
            format!("CSV is missing required column '{name}' (found: {}).", known.join(", ")),
        )
    })
}

fn parse_row(
    row: &StringRecord,
    date_idx: usize,
    country_idx: usize,
    metric_columns: &[(usize, String)],
    date_format: &str,
) -> Result<Record, String> {
    let raw_date = row.get(date_idx).unwrap_or("");
    let date = NaiveDate::parse_from_str(raw_date, date_format)
        .map_err(|e| format!("Invalid date '{raw_date}' (expected {date_format}): {e}"))?;

    let country = row.get(country_idx).unwrap_or("");
    if country.is_empty() {
        return Err("Missing country".to_string());
    }

    let mut record = Record::new(date, country);
    for (idx, name) in metric_columns {
        if let Some(value) = row.get(*idx).and_then(parse_number) {
            record.fields.insert(name.clone(), value);
        }
    }
    Ok(record)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn compute_stats(records: &[Record]) -> Option<DatasetStats> {
    let date_min = records.first()?.date;
    let date_max = records.last()?.date;
    let countries = records
        .iter()
        .map(|r| r.country.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    Some(DatasetStats {
        date_min,
        date_max,
        countries,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CSV: &str = "\u{feff}dateRep,day,month,year,cases,deaths,countriesAndTerritories,geoId\n\
        02-03-2020,2,3,2020,20,1,Italy,IT\n\
        01-03-2020,1,3,2020,15,,Italy,IT\n\
        01-03-2020,1,3,2020,7,0,Spain,ES\n\
        31-02-2020,31,2,2020,9,0,Spain,ES\n\
        03-03-2020,3,3,2020,n/a,2,,XX\n\
        03-03-2020,3,3,2020,n/a,2,Spain,ES\n";

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    #[test]
    fn parses_sorts_and_reports_bad_rows() {
        let data = read_records(CSV.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(data.rows_read, 6);
        assert_eq!(data.rows_used, 4);
        assert_eq!(data.row_errors.len(), 2);
        assert_eq!(data.row_errors[0].line, 5);
        assert!(data.row_errors[0].message.contains("Invalid date"));
        assert_eq!(data.row_errors[1].message, "Missing country");

        let dates: Vec<_> = data.records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(1), day(1), day(2), day(3)]);
        // Same-day rows keep file order.
        assert_eq!(data.records[0].country, "Italy");
        assert_eq!(data.records[1].country, "Spain");

        assert_eq!(data.stats.countries, 2);
        assert_eq!(data.stats.date_min, day(1));
        assert_eq!(data.stats.date_max, day(3));
    }

    #[test]
    fn non_numeric_metrics_are_absent() {
        let data = read_records(CSV.as_bytes(), &IngestOptions::default()).unwrap();
        let italy_first = &data.records[0];
        assert_eq!(italy_first.value("cases"), Some(15.0));
        assert_eq!(italy_first.value("deaths"), None);
        assert_eq!(italy_first.value("geoId"), None);

        let spain_last = &data.records[3];
        assert_eq!(spain_last.value("cases"), None);
        assert_eq!(spain_last.value("deaths"), Some(2.0));
    }

    #[test]
    fn missing_key_column_is_a_schema_error() {
        let options = IngestOptions {
            country_column: "country".to_string(),
            ..IngestOptions::default()
        };
        let err = read_records(CSV.as_bytes(), &options).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("'country'"));
    }

    #[test]
    fn no_usable_rows_is_a_data_error() {
        let csv = "dateRep,cases,countriesAndTerritories\nnot-a-date,1,Italy\n";
        let err = read_records(csv.as_bytes(), &IngestOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn custom_date_format() {
        let csv = "date,cases,country\n2020-03-02,11,Italy\n";
        let options = IngestOptions {
            date_column: "date".to_string(),
            country_column: "country".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        };
        let data = read_records(csv.as_bytes(), &options).unwrap();
        assert_eq!(data.records[0].date, day(2));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let data = load_records(file.path(), &IngestOptions::default()).unwrap();
        assert_eq!(data.rows_used, 4);

        let err = load_records(Path::new("/nonexistent/data.csv"), &IngestOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
