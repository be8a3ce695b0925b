//! Dataset-level helpers on top of ingested records.
//!
//! - `catalog`: per-country segments and lookup tables
//! - `sample`: deterministic synthetic outbreaks for demos and tests

pub mod catalog;
pub mod sample;

pub use catalog::{Catalog, CatalogOptions, Country, MetricCurve};
pub use sample::{SampleConfig, generate_outbreak, write_sample_csv};
