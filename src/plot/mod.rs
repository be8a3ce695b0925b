//! Terminal plotting without a TUI.

pub mod ascii;

pub use ascii::{PlotOptions, PlotSeries, render_ascii_chart, series_from_snapshot, series_from_state, y_domain_for};
