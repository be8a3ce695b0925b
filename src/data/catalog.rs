//! Country catalog: every country that has something to draw.
//!
//! Built once per dataset and window. For each country we segment both metrics
//! with the window start as lower bound and keep the flattened points around
//! for hover lookups.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{ChartConfig, ChartWindow, Metric, Record, Segment};
use crate::series::{Series, SeriesError, SortedPoints};

/// Thresholds and lower bound used while segmenting.
#[derive(Debug, Clone, Copy)]
pub struct CatalogOptions {
    pub window: ChartWindow,
    pub cases_threshold: f64,
    pub deaths_threshold: f64,
}

impl CatalogOptions {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            window: config.window,
            cases_threshold: config.cases_threshold,
            deaths_threshold: config.deaths_threshold,
        }
    }

    fn threshold(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cases => self.cases_threshold,
            Metric::Deaths => self.deaths_threshold,
        }
    }
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

/// Segments of one metric plus the same points flattened for lookups.
#[derive(Debug, Clone, Default)]
pub struct MetricCurve {
    pub segments: Vec<Segment>,
    pub points: SortedPoints,
}

impl MetricCurve {
    fn build(series: &Series, metric: Metric, threshold: f64, lower_bound: chrono::NaiveDate) -> Result<Self, SeriesError> {
        let segments = series.segments(metric.column(), threshold, Some(lower_bound));
        let points = SortedPoints::from_segments(&segments)?;
        Ok(Self { segments, points })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Largest plotted value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.points.as_slice().iter().map(|p| p.value).reduce(f64::max)
    }
}

#[derive(Debug, Clone)]
pub struct Country {
    pub id: usize,
    pub name: String,
    pub cases: MetricCurve,
    pub deaths: MetricCurve,
}

impl Country {
    pub fn curve(&self, metric: Metric) -> &MetricCurve {
        match metric {
            Metric::Cases => &self.cases,
            Metric::Deaths => &self.deaths,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    /// Group `records` by country and segment each country's series.
    ///
    /// `records` must already be sorted by date (ingest guarantees this).
    /// Countries without a single `cases` segment are left out.
    pub fn build(records: &[Record], options: &CatalogOptions) -> Result<Self, SeriesError> {
        let mut by_country: BTreeMap<&str, Vec<Record>> = BTreeMap::new();
        for r in records {
            by_country.entry(r.country.as_str()).or_default().push(r.clone());
        }

        let groups: Vec<(&str, Vec<Record>)> = by_country.into_iter().collect();
        let built = groups
            .into_par_iter()
            .map(|(name, rows)| build_curves(name, rows, options))
            .collect::<Result<Vec<_>, SeriesError>>()?;

        let countries: Vec<Country> = built
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(id, (name, cases, deaths))| Country {
                id,
                name,
                cases,
                deaths,
            })
            .collect();

        info!(countries = countries.len(), "built country catalog");
        Ok(Self { countries })
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn by_id(&self, id: usize) -> Option<&Country> {
        self.countries.get(id)
    }

    /// Case-insensitive name lookup; underscores and spaces are interchangeable.
    pub fn by_name(&self, name: &str) -> Option<&Country> {
        let wanted = normalize_name(name);
        self.countries.iter().find(|c| normalize_name(&c.name) == wanted)
    }

    /// Countries whose name contains `needle` (case-insensitive).
    pub fn filter<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Country> + 'a {
        let needle = normalize_name(needle);
        self.countries
            .iter()
            .filter(move |c| needle.is_empty() || normalize_name(&c.name).contains(&needle))
    }
}

type CountryCurves = (String, MetricCurve, MetricCurve);

fn build_curves(name: &str, rows: Vec<Record>, options: &CatalogOptions) -> Result<Option<CountryCurves>, SeriesError> {
    let series = Series::new(name, rows)?;
    let lower = options.window.start;
    let cases = MetricCurve::build(&series, Metric::Cases, options.threshold(Metric::Cases), lower)?;
    if cases.is_empty() {
        debug!(country = series.country(), records = series.len(), "no case segments in window, skipping");
        return Ok(None);
    }
    let deaths = MetricCurve::build(&series, Metric::Deaths, options.threshold(Metric::Deaths), lower)?;
    Ok(Some((series.country().to_string(), cases, deaths)))
}

fn normalize_name(name: &str) -> String {
    name.trim().replace('_', " ").to_lowercase()
}
