//! Threshold segmentation.
//!
//! A country's curve is only drawn where the counter is at least the threshold
//! (the y-axis is logarithmic, so small and zero days cannot be placed on it).
//! Every maximal run of eligible records becomes one `Segment`; the records in
//! between break the line.

use chrono::NaiveDate;

use crate::domain::{Point, Record, Segment};
use crate::series::Series;

/// Split `series` into maximal runs where `field >= threshold`.
///
/// A record is eligible when its `field` is present and finite, meets the
/// threshold, and is not dated before `lower_bound`. Ineligible records close
/// the current run and are dropped. Runs of length 1 are kept.
pub fn segment(series: &Series, field: &str, threshold: f64, lower_bound: Option<NaiveDate>) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for record in series.records() {
        match eligible_value(record, field, threshold, lower_bound) {
            Some(value) => current.push(Point::new(record.date, value)),
            None => {
                if !current.is_empty() {
                    out.push(Segment::from(std::mem::take(&mut current)));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(Segment::from(current));
    }

    out
}

/// The value a record contributes to a segment, or `None` if it is ineligible.
fn eligible_value(record: &Record, field: &str, threshold: f64, lower_bound: Option<NaiveDate>) -> Option<f64> {
    if lower_bound.is_some_and(|bound| record.date < bound) {
        return None;
    }
    record.value(field).filter(|&v| v >= threshold)
}
