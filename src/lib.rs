//! `epicurve` library crate.
//!
//! Daily epidemic curves per country: CSV ingest, threshold segmentation,
//! nearest-date lookup, and the chart state shared by the terminal front-ends.
//!
//! The binary (`epicurve`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the TUI and the plain CLI share one pipeline

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
pub mod tui;
