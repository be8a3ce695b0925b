//! Axis scales: dates along x, a logarithmic counter axis along y.
//!
//! Both scales map a domain value onto a `[r0, r1]` output range (pixels,
//! terminal cells, or plot coordinates). Ranges may be inverted, e.g.
//! `(height, 0)` for a y-axis that grows upwards.

use chrono::{Duration, NaiveDate};

use crate::domain::ChartWindow;

/// Tick values on the counter axis.
pub const LOG_TICKS: [f64; 12] = [
    10.0, 20.0, 30.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0, 20000.0,
];

/// Default counter-axis domain.
pub const DEFAULT_LOG_DOMAIN: (f64, f64) = (10.0, 50_000.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(window: ChartWindow, range: (f64, f64)) -> Self {
        Self {
            start: window.start,
            end: window.end,
            range,
        }
    }

    fn span_days(&self) -> f64 {
        ((self.end - self.start).num_days() as f64).max(1.0)
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        let days = (date - self.start).num_days() as f64;
        self.range.0 + days * (self.range.1 - self.range.0) / self.span_days()
    }

    /// Output coordinate back to a date, rounded to the nearest day.
    pub fn invert(&self, x: f64) -> NaiveDate {
        let width = self.range.1 - self.range.0;
        if width == 0.0 || !x.is_finite() {
            return self.start;
        }
        let days = ((x - self.range.0) * self.span_days() / width).round() as i64;
        self.start + Duration::days(days)
    }

    /// `count` evenly spaced dates from start to end (inclusive).
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        if count < 2 {
            return vec![self.start];
        }
        let span = (self.end - self.start).num_days();
        (0..count)
            .map(|i| {
                let offset = (span as f64 * i as f64 / (count as f64 - 1.0)).round() as i64;
                self.start + Duration::days(offset)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a counter value; `None` if it cannot be placed on a log axis.
    ///
    /// Values outside the domain are clamped to its edges.
    pub fn map(&self, value: f64) -> Option<f64> {
        if !(value.is_finite() && value > 0.0) {
            return None;
        }
        let (lo, hi) = self.domain;
        if !(lo > 0.0 && hi > lo) {
            return None;
        }
        let v = value.clamp(lo, hi);
        let u = (v.ln() - lo.ln()) / (hi.ln() - lo.ln());
        Some(self.range.0 + u * (self.range.1 - self.range.0))
    }

    /// Smallest decade-aligned domain that contains [`DEFAULT_LOG_DOMAIN`] and `values`.
    pub fn domain_covering(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
        let (mut lo, mut hi) = DEFAULT_LOG_DOMAIN;
        for v in values.into_iter().filter(|v| v.is_finite() && *v > 0.0) {
            lo = lo.min(10f64.powi(v.log10().floor() as i32));
            hi = hi.max(10f64.powi(v.log10().ceil() as i32));
        }
        (lo, hi)
    }

    /// Ticks from [`LOG_TICKS`] inside the domain.
    pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        LOG_TICKS
            .iter()
            .copied()
            .filter(|&t| t >= self.domain.0 && t <= self.domain.1)
    }
}

/// Tick label: plain integer.
pub fn format_count(value: f64) -> String {
    format!("{value:.0}")
}

/// Short date label (`"01 Mar"`).
pub fn format_day(date: NaiveDate) -> String {
    date.format("%d %b").to_string()
}
