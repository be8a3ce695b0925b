//! Read/write chart snapshot JSON files.
//!
//! A snapshot is the "portable" representation of what is on screen:
//! - the metric and visible window
//! - every selected country with its legend color and segments
//!
//! `epicurve plot --snapshot <file>` redraws one without the source CSV.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::{ChartState, palette};
use crate::data::catalog::Catalog;
use crate::domain::{ChartWindow, Metric, Segment};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub tool: String,
    pub metric: Metric,
    pub window: ChartWindow,
    pub countries: Vec<SnapshotCountry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCountry {
    pub name: String,
    pub color_index: usize,
    pub color: String,
    pub segments: Vec<Segment>,
}

impl ChartSnapshot {
    /// Capture the selected countries' segments for the current metric.
    pub fn capture(catalog: &Catalog, state: &ChartState) -> Self {
        let countries = state
            .selected()
            .iter()
            .filter_map(|s| {
                let country = catalog.by_id(s.country_id)?;
                Some(SnapshotCountry {
                    name: country.name.clone(),
                    color_index: s.color_index,
                    color: palette::hex(s.color_index),
                    segments: country.curve(state.metric).segments.clone(),
                })
            })
            .collect();

        Self {
            tool: "epicurve".to_string(),
            metric: state.metric,
            window: state.window,
            countries,
        }
    }
}

/// Write a snapshot JSON file.
pub fn write_snapshot_json(path: &Path, snapshot: &ChartSnapshot) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::new(2, format!("Failed to write snapshot JSON: {e}")))?;
    Ok(())
}

/// Read a snapshot JSON file.
pub fn read_snapshot_json(path: &Path) -> Result<ChartSnapshot, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open snapshot JSON '{}': {e}", path.display())))?;
    let snapshot: ChartSnapshot = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid snapshot JSON '{}': {e}", path.display())))?;
    Ok(snapshot)
}
