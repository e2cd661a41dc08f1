//! Test helpers for creating mock sessions and quote sources

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use b3lab_core::data::{Catalog, DataError, Period, QuoteSource};
use b3lab_core::domain::{PriceBar, PriceSeries};
use b3lab_core::AppConfig;

pub fn config() -> AppConfig {
    AppConfig::embedded().expect("embedded config parses")
}

pub fn catalog() -> Catalog {
    config().markets
}

/// `n` consecutive daily bars with a gentle zig-zag around 30.
pub fn sample_series(n: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let bars = (0..n)
        .map(|i| {
            let close = 30.0 + (i % 5) as f64 * 0.5 + i as f64 * 0.1;
            PriceBar {
                date: start + Duration::days(i as i64),
                open: close - 0.2,
                high: close + 0.4,
                low: close - 0.4,
                close,
                volume: 1_000_000 + i as u64 * 10,
            }
        })
        .collect();
    PriceSeries::new(bars)
}

/// Serves fixed series; any other ticker has no data.
pub struct StaticSource {
    series: HashMap<String, PriceSeries>,
}

impl StaticSource {
    pub fn with(ticker: &str, series: PriceSeries) -> Self {
        Self {
            series: HashMap::new(),
        }
        .and(ticker, series)
    }

    pub fn and(mut self, ticker: &str, series: PriceSeries) -> Self {
        self.series.insert(ticker.to_string(), series);
        self
    }
}

impl QuoteSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, ticker: &str, _period: Period) -> Result<PriceSeries, DataError> {
        self.series
            .get(ticker)
            .filter(|s| !s.is_empty())
            .cloned()
            .ok_or_else(|| DataError::NoData {
                symbol: ticker.to_string(),
            })
    }
}
