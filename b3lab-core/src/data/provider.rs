//! Quote source trait, fetch windows and structured error types.
//!
//! The QuoteSource trait abstracts over where historical bars come from
//! (Yahoo Finance in production, canned series in tests) so the navigation
//! layer never talks HTTP directly.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceSeries;

/// Look-back window requested from the provider, in Yahoo's `range` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error types for quote fetches.
///
/// Displayed inline by the ticker menu; none of them is fatal.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("rede indisponível: {0}")]
    NetworkUnreachable(String),

    #[error("limite de requisições atingido (tente novamente em {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status} para {symbol}")]
    Http { status: u16, symbol: String },

    #[error("formato de resposta inesperado: {0}")]
    ResponseFormatChanged(String),

    #[error("ticker não encontrado: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("nenhum dado encontrado para {symbol}")]
    NoData { symbol: String },
}

/// Source of daily price bars for one ticker.
///
/// Implementations perform exactly one attempt per call and return a
/// non-empty, canonical series or an error.
pub trait QuoteSource {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for `ticker` over the trailing `period`.
    fn fetch(&self, ticker: &str, period: Period) -> Result<PriceSeries, DataError>;
}
