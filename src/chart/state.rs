//! Chart state: which countries are drawn, in which color, for which metric.
//!
//! Front-ends (TUI, CLI commands) own one `ChartState` and pass it to the
//! renderers; nothing here draws or does I/O.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::chart::palette;
use crate::data::catalog::{Catalog, Country};
use crate::domain::{ChartWindow, Metric, Point};

/// A country on the chart and its legend color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub country_id: usize,
    pub name: String,
    pub color_index: usize,
}

/// Value shown next to the cursor for one selected country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverReading {
    pub country_id: usize,
    pub name: String,
    pub color_index: usize,
    pub point: Point,
}

/// Everything the cursor reports for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverReadout {
    pub date: NaiveDate,
    pub metric: Metric,
    pub readings: Vec<HoverReading>,
}

/// Lowest palette index not in `used`.
///
/// The last palette entry is the overflow color: it is only handed out when
/// every other index is taken, and then to every further selection.
pub fn pick_color_index(used: impl IntoIterator<Item = usize>, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let mut taken = vec![false; palette_len];
    for i in used {
        if i < palette_len {
            taken[i] = true;
        }
    }
    (0..palette_len - 1)
        .find(|&i| !taken[i])
        .unwrap_or(palette_len - 1)
}

#[derive(Debug, Clone)]
pub struct ChartState {
    pub metric: Metric,
    pub window: ChartWindow,
    /// Hover readings farther than this from the cursor are hidden.
    pub tolerance: Duration,
    selected: Vec<Selection>,
}

impl ChartState {
    pub fn new(metric: Metric, window: ChartWindow, tolerance: Duration) -> Self {
        Self {
            metric,
            window,
            tolerance,
            selected: Vec::new(),
        }
    }

    /// Selections in legend order.
    pub fn selected(&self) -> &[Selection] {
        &self.selected
    }

    pub fn is_selected(&self, country_id: usize) -> bool {
        self.selected.iter().any(|s| s.country_id == country_id)
    }

    /// Add `country` with a fresh color. Returns `false` if already selected.
    pub fn add(&mut self, country: &Country) -> bool {
        if self.is_selected(country.id) {
            return false;
        }
        let color_index = pick_color_index(
            self.selected.iter().map(|s| s.color_index),
            palette::palette_len(),
        );
        debug!(country = %country.name, color_index, "select country");
        self.selected.push(Selection {
            country_id: country.id,
            name: country.name.clone(),
            color_index,
        });
        true
    }

    /// Remove the legend entry at `index`, if any. Remaining entries keep
    /// order and colors.
    pub fn remove_at(&mut self, index: usize) -> Option<Selection> {
        if index >= self.selected.len() {
            return None;
        }
        let removed = self.selected.remove(index);
        debug!(country = %removed.name, "deselect country");
        Some(removed)
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    /// `(name, color_index)` pairs in legend order.
    pub fn legend(&self) -> impl Iterator<Item = (&str, usize)> {
        self.selected.iter().map(|s| (s.name.as_str(), s.color_index))
    }

    /// Look up the selected countries' values at `date`.
    pub fn hover(&self, catalog: &Catalog, date: NaiveDate) -> HoverReadout {
        let readings = self
            .selected
            .iter()
            .filter_map(|s| {
                let country = catalog.by_id(s.country_id)?;
                let point = country
                    .curve(self.metric)
                    .points
                    .nearest_within(date, self.tolerance)?;
                Some(HoverReading {
                    country_id: s.country_id,
                    name: s.name.clone(),
                    color_index: s.color_index,
                    point: *point,
                })
            })
            .collect();

        HoverReadout {
            date,
            metric: self.metric,
            readings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::CatalogOptions;
    use crate::domain::Record;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    fn catalog(names: &[&str]) -> Catalog {
        let mut records = Vec::new();
        for d in 1..=10u32 {
            for (i, name) in names.iter().enumerate() {
                // Every country skips day 5 so hover has a gap to fall into.
                if d == 5 {
                    continue;
                }
                records.push(
                    Record::new(day(d), *name)
                        .with_field("cases", 10.0 * d as f64 + i as f64)
                        .with_field("deaths", d as f64),
                );
            }
        }
        let options = CatalogOptions {
            window: ChartWindow::new(day(1), day(10)),
            cases_threshold: 10.0,
            deaths_threshold: 1.0,
        };
        Catalog::build(&records, &options).unwrap()
    }

    fn state() -> ChartState {
        ChartState::new(Metric::Cases, ChartWindow::new(day(1), day(10)), Duration::hours(12))
    }

    #[test]
    fn color_picks_lowest_free_index() {
        assert_eq!(pick_color_index([], 10), 0);
        assert_eq!(pick_color_index([0, 1, 3], 10), 2);
        assert_eq!(pick_color_index(0..9, 10), 9);
        assert_eq!(pick_color_index(0..10, 10), 9);
    }

    #[test]
    fn removing_frees_a_color_for_the_next_country() {
        let catalog = catalog(&["A", "B", "C", "D"]);
        let mut state = state();
        for c in catalog.countries().iter().take(3) {
            assert!(state.add(c));
        }
        assert_eq!(state.remove_at(1).unwrap().name, "B");
        assert!(state.add(catalog.by_name("D").unwrap()));

        let legend: Vec<_> = state.legend().collect();
        assert_eq!(legend, vec![("A", 0), ("C", 2), ("D", 1)]);
    }

    #[test]
    fn adding_twice_is_a_no_op() {
        let catalog = catalog(&["A"]);
        let mut state = state();
        let a = catalog.by_name("A").unwrap();
        assert!(state.add(a));
        assert!(!state.add(a));
        assert_eq!(state.selected().len(), 1);
        assert!(state.remove_at(99).is_none());
        assert_eq!(state.remove_at(0).unwrap().name, "A");
        assert!(state.remove_at(0).is_none());
    }

    #[test]
    fn hover_reports_values_on_the_cursor_day() {
        let catalog = catalog(&["A", "B"]);
        let mut state = state();
        state.add(catalog.by_name("B").unwrap());
        state.add(catalog.by_name("A").unwrap());

        let readout = state.hover(&catalog, day(3));
        let values: Vec<_> = readout.readings.iter().map(|r| (r.name.as_str(), r.point.value)).collect();
        assert_eq!(values, vec![("B", 31.0), ("A", 30.0)]);
    }

    #[test]
    fn hover_skips_countries_without_a_close_point() {
        let catalog = catalog(&["A"]);
        let mut state = state();
        state.add(catalog.by_name("A").unwrap());
        assert!(state.hover(&catalog, day(5)).readings.is_empty());

        state.tolerance = Duration::days(2);
        let readout = state.hover(&catalog, day(5));
        assert_eq!(readout.readings[0].point.date, day(4));
    }

    #[test]
    fn hover_follows_the_metric() {
        let catalog = catalog(&["A"]);
        let mut state = state();
        state.add(catalog.by_name("A").unwrap());
        state.set_metric(Metric::Deaths);
        let readout = state.hover(&catalog, day(7));
        assert_eq!(readout.metric, Metric::Deaths);
        assert_eq!(readout.readings[0].point.value, 7.0);
    }
}
