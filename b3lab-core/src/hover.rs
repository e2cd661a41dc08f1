//! Hover queries - which point of a series sits under the cursor.
//!
//! Charts on a date axis place each point at its date's day number; bar
//! charts place point `i` at `x = i`. The renderer converts a mouse column to
//! an x value and asks these functions what to show.

use chrono::{Datelike, NaiveDate};

use crate::metrics::SeriesPoint;

/// X coordinate of a date on a date axis.
pub fn date_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Point whose date is closest to `cursor_x` on a date axis.
///
/// Ties go to the earlier point. `None` for an empty series or a non-finite
/// cursor.
pub fn nearest_point(series: &[SeriesPoint], cursor_x: f64) -> Option<(NaiveDate, f64)> {
    if !cursor_x.is_finite() {
        return None;
    }
    series
        .iter()
        .map(|p| ((date_x(p.date) - cursor_x).abs(), p))
        .reduce(|best, cand| if cand.0 < best.0 { cand } else { best })
        .map(|(_, p)| (p.date, p.value))
}

/// Point at the rounded index `cursor_x` on an index axis.
///
/// `None` when the rounded index falls outside the series.
pub fn nearest_index(series: &[SeriesPoint], cursor_x: f64) -> Option<(usize, NaiveDate, f64)> {
    if !cursor_x.is_finite() {
        return None;
    }
    let idx = cursor_x.round();
    if idx < 0.0 || idx >= series.len() as f64 {
        return None;
    }
    let i = idx as usize;
    Some((i, series[i].date, series[i].value))
}
