//! Metrics engine - pure functions from a price series to derived series.
//!
//! Every function takes the series by reference and recomputes from scratch;
//! no result is stored on the session. All returns are in percent.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::PriceSeries;

/// One dated value of a derived series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Percent returns, dated at the later of the two bars compared.
pub type ReturnSeries = Vec<SeriesPoint>;

/// Rolling standard deviation of returns, dated at each window's last return.
pub type VolatilitySeries = Vec<SeriesPoint>;

/// Daily percent change of consecutive closes.
///
/// Empty for fewer than 2 bars.
pub fn daily_returns(series: &PriceSeries) -> ReturnSeries {
    series
        .bars()
        .windows(2)
        .map(|w| SeriesPoint::new(w[1].date, pct_change(w[0].close, w[1].close)))
        .collect()
}

/// Percent change between the last closes of consecutive calendar weeks.
///
/// Weeks run Monday to Sunday and are labelled by their Sunday. A week with
/// no trading days is absent from the resample, so the next week is compared
/// with the last week that traded.
pub fn weekly_returns(series: &PriceSeries) -> ReturnSeries {
    let weekly = weekly_closes(series);
    weekly
        .windows(2)
        .map(|w| SeriesPoint::new(w[1].date, pct_change(w[0].value, w[1].value)))
        .collect()
}

/// Last close of each calendar week that has at least one bar.
pub fn weekly_closes(series: &PriceSeries) -> Vec<SeriesPoint> {
    let mut out: Vec<SeriesPoint> = Vec::new();
    for bar in series.bars() {
        let week_end = week_ending_sunday(bar.date);
        match out.last_mut() {
            Some(last) if last.date == week_end => last.value = bar.close,
            _ => out.push(SeriesPoint::new(week_end, bar.close)),
        }
    }
    out
}

fn week_ending_sunday(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
    date + Duration::days(days_to_sunday)
}

/// Sample standard deviation over each trailing window of `window` returns.
///
/// Uses the n − 1 denominator. Empty when `window < 2` (undefined for a
/// single value) or when there are fewer returns than `window`.
pub fn rolling_volatility(returns: &[SeriesPoint], window: usize) -> VolatilitySeries {
    if window < 2 || returns.len() < window {
        return Vec::new();
    }
    returns
        .windows(window)
        .map(|w| {
            let values: Vec<f64> = w.iter().map(|p| p.value).collect();
            SeriesPoint::new(w[window - 1].date, sample_std_dev(&values))
        })
        .collect()
}

/// Cumulative percent return of every bar relative to the first bar.
///
/// The first point is exactly zero.
pub fn cumulative_return(series: &PriceSeries) -> ReturnSeries {
    let Some(first) = series.first() else {
        return Vec::new();
    };
    let base = first.close;
    series
        .bars()
        .iter()
        .map(|b| SeriesPoint::new(b.date, (b.close / base - 1.0) * 100.0))
        .collect()
}

// ─── Helpers ────────────────────────────────────────────────────────

fn pct_change(prev: f64, next: f64) -> f64 {
    (next - prev) / prev * 100.0
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n − 1). Returns NaN for fewer than 2 values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}

pub fn values(series: &[SeriesPoint]) -> Vec<f64> {
    series.iter().map(|p| p.value).collect()
}

pub fn last_value(series: &[SeriesPoint]) -> Option<f64> {
    series.last().map(|p| p.value)
}

/// The last `n` points (all of them if there are fewer).
pub fn tail(series: &[SeriesPoint], n: usize) -> &[SeriesPoint] {
    &series[series.len().saturating_sub(n)..]
}

/// Point with the largest value; the earliest wins a tie.
pub fn max_point(series: &[SeriesPoint]) -> Option<SeriesPoint> {
    series
        .iter()
        .copied()
        .reduce(|best, p| if p.value > best.value { p } else { best })
}

/// Point with the smallest value; the earliest wins a tie.
pub fn min_point(series: &[SeriesPoint]) -> Option<SeriesPoint> {
    series
        .iter()
        .copied()
        .reduce(|best, p| if p.value < best.value { p } else { best })
}
