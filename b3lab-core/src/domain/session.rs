//! Session - the ticker currently loaded for analysis.

use super::series::PriceSeries;

/// The single live analysis session.
///
/// Holds only the fetched series; every derived statistic is recomputed
/// from it on demand so nothing survives a ticker change.
#[derive(Debug, Clone)]
pub struct Session {
    pub ticker: String,
    pub company_name: String,
    pub series: PriceSeries,
}

impl Session {
    pub fn new(
        ticker: impl Into<String>,
        company_name: impl Into<String>,
        series: PriceSeries,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
            series,
        }
    }

    /// `"Petrobras (PETR4.SA)"`, used in titles.
    pub fn label(&self) -> String {
        format!("{} ({})", self.company_name, self.ticker)
    }
}
