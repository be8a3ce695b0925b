//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (after loading `.env`)
//! - resolves the dataset path
//! - runs the load/segment pipeline
//! - prints reports, plots and hover readouts
//! - writes exports

use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;
use tracing::info;

use crate::cli::{Command, DataArgs, DemoArgs, ExportArgs, HoverArgs, PlotArgs};
use crate::domain::{ChartConfig, ChartWindow};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `epicurve` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `epicurve` and `epicurve -c Spain` behave like `epicurve tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Countries(args) => handle_countries(args),
        Command::Plot(args) => handle_plot(args),
        Command::Hover(args) => handle_hover(args),
        Command::Export(args) => handle_export(args),
        Command::Demo(args) => handle_demo(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_countries(args: DataArgs) -> Result<(), AppError> {
    let config = resolve_config(&args)?;
    let run = pipeline::load_dataset(&config)?;

    println!(
        "{}",
        crate::report::format_dataset_summary(&run.ingest, &run.catalog, &config)
    );
    println!("{}", crate::report::format_country_list(&run.catalog, config.metric));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    if let Some(path) = &args.snapshot {
        let snapshot = crate::io::snapshot::read_snapshot_json(path)?;
        let series = crate::plot::series_from_snapshot(&snapshot);
        let options = crate::plot::PlotOptions {
            window: snapshot.window,
            y_domain: crate::plot::y_domain_for(&series),
            y_label: snapshot.metric.display_name().to_string(),
            width: args.width,
            height: args.height,
            cursor: args.at,
        };
        println!("{}", crate::plot::render_ascii_chart(&series, &options));
        return Ok(());
    }

    let config = resolve_config(&args.data)?;
    let run = pipeline::load_dataset(&config)?;
    let state = pipeline::initial_state(&run.catalog, &config);

    let series = crate::plot::series_from_state(&run.catalog, &state);
    let options = crate::plot::PlotOptions {
        window: state.window,
        y_domain: crate::plot::y_domain_for(&series),
        y_label: state.metric.display_name().to_string(),
        width: args.width,
        height: args.height,
        cursor: args.at,
    };
    println!("{}", crate::plot::render_ascii_chart(&series, &options));

    if let Some(at) = args.at {
        println!("{}", crate::report::format_hover(&state.hover(&run.catalog, at)));
    }
    Ok(())
}

fn handle_hover(args: HoverArgs) -> Result<(), AppError> {
    let config = resolve_config(&args.data)?;
    let run = pipeline::load_dataset(&config)?;
    let state = pipeline::initial_state(&run.catalog, &config);

    print!("{}", crate::report::format_hover(&state.hover(&run.catalog, args.at)));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.segments.is_none() && args.snapshot.is_none() {
        return Err(AppError::new(
            2,
            "Nothing to export. Pass --segments <file.csv> and/or --snapshot <file.json>.",
        ));
    }

    let config = resolve_config(&args.data)?;
    let run = pipeline::load_dataset(&config)?;
    let state = pipeline::initial_state(&run.catalog, &config);

    if let Some(path) = &args.segments {
        let rows = crate::io::export::write_segments_csv(path, &run.catalog, &state)?;
        println!("Wrote {rows} segment rows to {}", path.display());
    }
    if let Some(path) = &args.snapshot {
        let snapshot = crate::io::snapshot::ChartSnapshot::capture(&run.catalog, &state);
        crate::io::snapshot::write_snapshot_json(path, &snapshot)?;
        println!("Wrote chart snapshot to {}", path.display());
    }
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let sample = crate::data::SampleConfig {
        seed: args.seed,
        days: args.days,
        ..crate::data::SampleConfig::default()
    };
    let records = crate::data::generate_outbreak(&sample)?;
    crate::data::write_sample_csv(&args.out, &records)?;
    info!(rows = records.len(), path = %args.out.display(), "wrote demo dataset");
    println!(
        "Wrote {} rows for {} countries to {}",
        records.len(),
        sample.countries.len(),
        args.out.display()
    );
    Ok(())
}

fn handle_tui(args: DataArgs) -> Result<(), AppError> {
    let config = resolve_config(&args)?;
    crate::tui::run(config)
}

fn resolve_config(args: &DataArgs) -> Result<ChartConfig, AppError> {
    let data_path = crate::cli::picker::resolve_data_path(args.data.as_deref())?;
    chart_config_from_args(args, data_path)
}

/// Validate flags and build the pipeline configuration.
pub fn chart_config_from_args(args: &DataArgs, data_path: PathBuf) -> Result<ChartConfig, AppError> {
    if args.start > args.end {
        return Err(AppError::new(
            2,
            format!("--start ({}) is after --end ({}).", args.start, args.end),
        ));
    }
    for (flag, value) in [
        ("--cases-threshold", args.cases_threshold),
        ("--deaths-threshold", args.deaths_threshold),
    ] {
        if !value.is_finite() {
            return Err(AppError::new(2, format!("{flag} must be a finite number.")));
        }
    }
    if args.tolerance_hours <= 0 {
        return Err(AppError::new(2, "--tolerance-hours must be > 0."));
    }
    let hover_tolerance = Duration::try_hours(args.tolerance_hours).ok_or_else(|| {
        AppError::new(
            2,
            format!("--tolerance-hours {} is out of range.", args.tolerance_hours),
        )
    })?;

    Ok(ChartConfig {
        data_path,
        date_column: args.date_column.clone(),
        country_column: args.country_column.clone(),
        date_format: args.date_format.clone(),
        window: ChartWindow::new(args.start, args.end),
        metric: args.metric,
        cases_threshold: args.cases_threshold,
        deaths_threshold: args.deaths_threshold,
        hover_tolerance,
        countries: args.countries.clone(),
    })
}

/// Rewrite argv so `epicurve` defaults to `epicurve tui`.
///
/// Rules:
/// - `epicurve`                      -> `epicurve tui`
/// - `epicurve -c Spain ...`         -> `epicurve tui -c Spain ...`
/// - `epicurve --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "countries" | "plot" | "hover" | "export" | "demo" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::cli::Cli;
    use crate::domain::Metric;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn data_args(extra: &[&str]) -> DataArgs {
        let mut all = vec!["epicurve", "countries"];
        all.extend_from_slice(extra);
        match Cli::try_parse_from(all).unwrap().command {
            Command::Countries(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_and_flags_default_to_tui() {
        assert_eq!(rewrite_args(argv(&["epicurve"])), argv(&["epicurve", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["epicurve", "-c", "Spain"])),
            argv(&["epicurve", "tui", "-c", "Spain"])
        );
        assert_eq!(
            rewrite_args(argv(&["epicurve", "hover", "--at", "2020-03-04"])),
            argv(&["epicurve", "hover", "--at", "2020-03-04"])
        );
        assert_eq!(rewrite_args(argv(&["epicurve", "--help"])), argv(&["epicurve", "--help"]));
    }

    #[test]
    fn config_carries_flags() {
        let args = data_args(&["-m", "deaths", "--tolerance-hours", "36", "-c", "Spain"]);
        let config = chart_config_from_args(&args, PathBuf::from("x.csv")).unwrap();
        assert_eq!(config.metric, Metric::Deaths);
        assert_eq!(config.hover_tolerance, Duration::hours(36));
        assert_eq!(config.countries, vec!["Spain".to_string()]);
        assert_eq!(config.window.start, NaiveDate::from_ymd_opt(2020, 2, 15).unwrap());
        assert_eq!(config.data_path, PathBuf::from("x.csv"));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let args = data_args(&["--start", "2020-03-10", "--end", "2020-03-01"]);
        let err = chart_config_from_args(&args, PathBuf::from("x.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn non_positive_tolerance_is_rejected() {
        let args = data_args(&["--tolerance-hours", "0"]);
        assert!(chart_config_from_args(&args, PathBuf::from("x.csv")).is_err());
    }

    #[test]
    fn huge_tolerance_is_an_input_error() {
        let args = data_args(&["--tolerance-hours", "9223372036854775807"]);
        let err = chart_config_from_args(&args, PathBuf::from("x.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("out of range"));
    }
}
