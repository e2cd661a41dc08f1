//! PriceBar - one trading day of OHLCV data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar for a single ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Returns true if the close is missing (NaN), infinite or non-positive.
    ///
    /// Such a bar cannot anchor a percent change and is dropped on load.
    pub fn is_void(&self) -> bool {
        !self.close.is_finite() || self.close <= 0.0
    }
}
