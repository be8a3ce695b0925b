//! Shared "load and segment" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> per-country segmentation -> initial selection
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::{info, warn};

use crate::chart::ChartState;
use crate::data::catalog::{Catalog, CatalogOptions};
use crate::domain::ChartConfig;
use crate::error::AppError;
use crate::io::ingest::{IngestOptions, IngestedData, load_records};

/// Everything computed from one dataset file.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub catalog: Catalog,
}

/// Read the CSV at `config.data_path` and build the country catalog.
pub fn load_dataset(config: &ChartConfig) -> Result<RunOutput, AppError> {
    let ingest = load_records(&config.data_path, &IngestOptions::from_config(config))?;
    let catalog = build_catalog(&ingest, config)?;
    Ok(RunOutput { ingest, catalog })
}

/// Segment already-ingested records with the thresholds in `config`.
pub fn build_catalog(ingest: &IngestedData, config: &ChartConfig) -> Result<Catalog, AppError> {
    let catalog = Catalog::build(&ingest.records, &CatalogOptions::from_config(config))?;
    if catalog.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No country reaches {} daily cases between {} and {}.",
                config.cases_threshold, config.window.start, config.window.end
            ),
        ));
    }
    Ok(catalog)
}

/// Chart state with `config.countries` selected, in the given order.
///
/// Names missing from the catalog are logged and skipped.
pub fn initial_state(catalog: &Catalog, config: &ChartConfig) -> ChartState {
    let mut state = ChartState::new(config.metric, config.window, config.hover_tolerance);
    for name in &config.countries {
        match catalog.by_name(name) {
            Some(country) => {
                state.add(country);
            }
            None => warn!(country = %name, "country not in catalog, skipping"),
        }
    }
    info!(selected = state.selected().len(), metric = ?state.metric, "initial chart state");
    state
}
