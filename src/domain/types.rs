//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by CSV ingest and the synthetic generator
//! - consumed by the segmenter and the nearest-point locator
//! - exported to JSON/CSV and reloaded for plotting

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which daily counter is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cases,
    Deaths,
}

impl Metric {
    /// CSV column (and record field) holding this metric.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
        }
    }

    /// Smallest daily value drawn on the chart.
    ///
    /// The y-axis is logarithmic, so the threshold also keeps zero days off it.
    pub fn default_threshold(self) -> f64 {
        match self {
            Metric::Cases => 10.0,
            Metric::Deaths => 1.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
        }
    }

    pub fn toggle(self) -> Metric {
        match self {
            Metric::Cases => Metric::Deaths,
            Metric::Deaths => Metric::Cases,
        }
    }
}

/// One parsed CSV row: a country's counters for one day.
///
/// Fields that were missing or non-numeric in the source are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub country: String,
    pub fields: BTreeMap<String, f64>,
}

impl Record {
    pub fn new(date: NaiveDate, country: impl Into<String>) -> Self {
        Self {
            date,
            country: country.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by the generator and tests.
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        if value.is_finite() {
            self.fields.insert(name.into(), value);
        }
        self
    }

    /// Numeric value of `field`, if present and finite.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied().filter(|v| v.is_finite())
    }
}

/// A single `(date, value)` observation on a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub date: NaiveDate,
    pub value: f64,
}

impl Point {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A maximal contiguous run of a series meeting a threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segment {
    pub points: Vec<Point>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the segment is long enough to draw as a line (not just a dot).
    pub fn is_drawable_line(&self) -> bool {
        self.points.len() >= 2
    }
}

impl From<Vec<Point>> for Segment {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Visible date range of the chart.
///
/// `start` doubles as the segmenter's lower bound: records before it are never
/// part of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ChartWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Clamp `date` into the window.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }
}

impl Default for ChartWindow {
    fn default() -> Self {
        // Start of the European outbreak; the chart was built for this range.
        Self {
            start: NaiveDate::from_ymd_opt(2020, 2, 15).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2020, 3, 27).unwrap_or_default(),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus `.env`/environment defaults).
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub data_path: PathBuf,
    pub date_column: String,
    pub country_column: String,
    pub date_format: String,

    pub window: ChartWindow,
    pub metric: Metric,
    pub cases_threshold: f64,
    pub deaths_threshold: f64,

    /// Hover readings farther than this from the cursor date are hidden.
    pub hover_tolerance: Duration,

    /// Countries selected at start-up (matched case-insensitively).
    pub countries: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            date_column: "dateRep".to_string(),
            country_column: "countriesAndTerritories".to_string(),
            date_format: "%d-%m-%Y".to_string(),
            window: ChartWindow::default(),
            metric: Metric::Cases,
            cases_threshold: Metric::Cases.default_threshold(),
            deaths_threshold: Metric::Deaths.default_threshold(),
            hover_tolerance: Duration::hours(12),
            countries: vec!["Italy".to_string()],
        }
    }
}
