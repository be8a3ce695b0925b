//! Nearest-point lookup for the hover cursor.

use chrono::{Duration, NaiveDate};

use crate::domain::Point;
use crate::series::SortedPoints;

/// Return the point whose date is closest to `query`.
///
/// Queries before the first point or after the last clamp to that point.
/// Between two points the closer one wins; an exact tie goes to the earlier
/// point. `None` only for empty input.
pub fn nearest(points: &SortedPoints, query: NaiveDate) -> Option<&Point> {
    let points = points.as_slice();
    let first = points.first()?;
    let last = points.last()?;
    if query <= first.date {
        return Some(first);
    }
    if query >= last.date {
        return Some(last);
    }

    // first.date < query < last.date, so 1 <= b <= len - 1 and
    // points[b - 1].date <= query < points[b].date.
    let b = points.partition_point(|p| p.date <= query);
    let a = b - 1;

    let before = query - points[a].date;
    let after = points[b].date - query;
    if before <= after {
        Some(&points[a])
    } else {
        Some(&points[b])
    }
}

/// Like [`nearest`], but only if the point is strictly closer than `tolerance`.
///
/// With day-granularity dates, a tolerance of 12 hours accepts only a point on
/// the query day itself.
pub fn nearest_within(points: &SortedPoints, query: NaiveDate, tolerance: Duration) -> Option<&Point> {
    nearest(points, query).filter(|p| (query - p.date).abs() < tolerance)
}
