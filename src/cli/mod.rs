//! Command-line parsing for the epidemic curve viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the segmentation/lookup code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::Metric;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "epicurve", version, about = "Daily epidemic curves per country")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every country with something to draw in the window.
    Countries(DataArgs),
    /// Render an ASCII chart of the selected countries.
    Plot(PlotArgs),
    /// Print the selected countries' values at a date.
    Hover(HoverArgs),
    /// Write the selected countries' segments to CSV and/or a snapshot JSON.
    Export(ExportArgs),
    /// Write a synthetic outbreak dataset in the daily-report CSV layout.
    Demo(DemoArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same dataset pipeline as the other commands, but renders the
    /// chart, legend and country selector in a terminal UI using Ratatui.
    Tui(DataArgs),
}

/// Options shared by every command that reads the dataset.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Daily report CSV. Falls back to an interactive picker when missing.
    #[arg(short = 'f', long = "data", env = "EPICURVE_DATA", value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// First visible day; earlier records are never drawn.
    #[arg(long, value_parser = parse_date, default_value = "2020-02-15")]
    pub start: NaiveDate,

    /// Last visible day.
    #[arg(long, value_parser = parse_date, default_value = "2020-03-27")]
    pub end: NaiveDate,

    /// Which counter to draw.
    #[arg(short = 'm', long, value_enum, default_value_t = Metric::Cases)]
    pub metric: Metric,

    /// Smallest daily case count drawn.
    #[arg(long, default_value_t = 10.0)]
    pub cases_threshold: f64,

    /// Smallest daily death count drawn.
    #[arg(long, default_value_t = 1.0)]
    pub deaths_threshold: f64,

    /// Date column name.
    #[arg(long, default_value = "dateRep")]
    pub date_column: String,

    /// Country column name.
    #[arg(long, default_value = "countriesAndTerritories")]
    pub country_column: String,

    /// chrono format of the date column.
    #[arg(long, default_value = "%d-%m-%Y")]
    pub date_format: String,

    /// Hover shows a value only if its day is closer than this many hours.
    #[arg(long, default_value_t = 12)]
    pub tolerance_hours: i64,

    /// Country to select (repeatable).
    #[arg(short = 'c', long = "country", default_values_t = vec!["Italy".to_string()])]
    pub countries: Vec<String>,
}

/// Options for the ASCII chart.
#[derive(Debug, Args)]
pub struct PlotArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Draw a cursor at this day.
    #[arg(long, value_parser = parse_date)]
    pub at: Option<NaiveDate>,

    /// Plot a snapshot JSON produced by `epicurve export --snapshot` instead of the CSV.
    #[arg(long, value_name = "JSON")]
    pub snapshot: Option<PathBuf>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct HoverArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Day to look up.
    #[arg(long, value_parser = parse_date)]
    pub at: NaiveDate,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Per-point segment CSV.
    #[arg(long, value_name = "CSV")]
    pub segments: Option<PathBuf>,

    /// Chart snapshot JSON.
    #[arg(long, value_name = "JSON")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Output CSV path.
    #[arg(short, long, default_value = "data.csv")]
    pub out: PathBuf,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of days to generate (starting 2020-01-31).
    #[arg(long, default_value_t = 70)]
    pub days: usize,
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}' (expected YYYY-MM-DD): {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_args_defaults() {
        let cli = Cli::try_parse_from(["epicurve", "countries"]).unwrap();
        let Command::Countries(args) = cli.command else {
            panic!("expected countries");
        };
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2020, 2, 15).unwrap());
        assert_eq!(args.metric, Metric::Cases);
        assert_eq!(args.countries, vec!["Italy".to_string()]);
        assert_eq!(args.tolerance_hours, 12);
    }

    #[test]
    fn repeated_countries_and_cursor() {
        let cli = Cli::try_parse_from([
            "epicurve", "plot", "-c", "Spain", "-c", "France", "--at", "2020-03-04", "-m", "deaths",
        ])
        .unwrap();
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.data.countries, vec!["Spain".to_string(), "France".to_string()]);
        assert_eq!(args.at, NaiveDate::from_ymd_opt(2020, 3, 4));
        assert_eq!(args.data.metric, Metric::Deaths);
    }

    #[test]
    fn hover_requires_a_date() {
        assert!(Cli::try_parse_from(["epicurve", "hover"]).is_err());
        assert!(parse_date("04-03-2020").is_err());
    }
}
