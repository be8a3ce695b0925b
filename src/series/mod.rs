//! Sorted daily series and the two algorithms run over them.
//!
//! - `segment`: split a country's series into contiguous runs above a threshold
//! - `locate`: binary-search a sorted point sequence for the point nearest a date
//!
//! Both are pure functions. Sortedness is validated once, when a `Series` or
//! `SortedPoints` is constructed, so the algorithms never re-check it.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Point, Record, Segment};

pub mod locate;
pub mod segment;

pub use locate::{nearest, nearest_within};
pub use segment::segment;

/// Invariant violations in series input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("dates out of order at index {index}: {next} follows {previous}")]
    Unsorted {
        index: usize,
        previous: NaiveDate,
        next: NaiveDate,
    },
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },
}

/// One country's records, sorted ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    country: String,
    records: Vec<Record>,
}

impl Series {
    /// Wrap `records` after checking they are in non-decreasing date order.
    pub fn new(country: impl Into<String>, records: Vec<Record>) -> Result<Self, SeriesError> {
        check_sorted(records.iter().map(|r| r.date))?;
        Ok(Self {
            country: country.into(),
            records,
        })
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Segment `field` at `threshold`, ignoring records before `lower_bound`.
    pub fn segments(&self, field: &str, threshold: f64, lower_bound: Option<NaiveDate>) -> Vec<Segment> {
        segment(self, field, threshold, lower_bound)
    }
}

/// A date-sorted sequence of finite points: the locator's search structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedPoints {
    points: Vec<Point>,
}

impl SortedPoints {
    pub fn new(points: Vec<Point>) -> Result<Self, SeriesError> {
        if let Some(index) = points.iter().position(|p| !p.value.is_finite()) {
            return Err(SeriesError::NonFinite { index });
        }
        check_sorted(points.iter().map(|p| p.date))?;
        Ok(Self { points })
    }

    /// Flatten segments (already in run order) into one searchable sequence.
    pub fn from_segments(segments: &[Segment]) -> Result<Self, SeriesError> {
        let points = segments
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect();
        Self::new(points)
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn nearest_within(&self, query: NaiveDate, tolerance: chrono::Duration) -> Option<&Point> {
        nearest_within(self, query, tolerance)
    }
}

fn check_sorted(dates: impl Iterator<Item = NaiveDate>) -> Result<(), SeriesError> {
    let mut previous: Option<NaiveDate> = None;
    for (index, next) in dates.enumerate() {
        if let Some(previous) = previous {
            if next < previous {
                return Err(SeriesError::Unsorted {
                    index,
                    previous,
                    next,
                });
            }
        }
        previous = Some(next);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    #[test]
    fn series_rejects_out_of_order_records() {
        let records = vec![Record::new(day(2), "Italy"), Record::new(day(1), "Italy")];
        let err = Series::new("Italy", records).unwrap_err();
        assert_eq!(
            err,
            SeriesError::Unsorted {
                index: 1,
                previous: day(2),
                next: day(1),
            }
        );
    }

    #[test]
    fn series_accepts_repeated_dates() {
        let records = vec![Record::new(day(1), "Italy"), Record::new(day(1), "Italy")];
        assert_eq!(Series::new("Italy", records).unwrap().len(), 2);
    }

    #[test]
    fn sorted_points_rejects_nan() {
        let err = SortedPoints::new(vec![Point::new(day(1), 1.0), Point::new(day(2), f64::NAN)]).unwrap_err();
        assert_eq!(err, SeriesError::NonFinite { index: 1 });
    }

    #[test]
    fn from_segments_flattens_in_run_order() {
        let segments = vec![
            Segment::from(vec![Point::new(day(1), 10.0), Point::new(day(2), 11.0)]),
            Segment::from(vec![Point::new(day(5), 30.0)]),
        ];
        let points = SortedPoints::from_segments(&segments).unwrap();
        let dates: Vec<_> = points.as_slice().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(5)]);
    }
}
