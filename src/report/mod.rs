//! Reporting utilities: dataset summary, country table, cursor readout.

pub mod format;

pub use format::*;
