//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the plotted counter selector (`Metric`)
//! - parsed daily observations (`Record`)
//! - curve building blocks (`Point`, `Segment`)
//! - run configuration (`ChartWindow`, `ChartConfig`)

pub mod types;

pub use types::*;
