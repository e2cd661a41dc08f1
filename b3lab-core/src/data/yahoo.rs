//! Yahoo Finance quote source.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API using its `range`
//! parameter, so a `Period` maps straight onto the query string. One attempt
//! per fetch: the user retries by selecting the ticker again.
//!
//! Prices are adjusted for dividends and splits: each bar's OHLC is scaled by
//! `adjclose / close`, so an ex-dividend date is not a price drop.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::{DataError, Period, QuoteSource};
use crate::domain::{PriceBar, PriceSeries};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    /// Exchange offset from UTC in seconds (-10800 for B3).
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance quote source.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    /// Build the provider with a request timeout.
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;
        Ok(Self { client })
    }

    /// Build the chart API URL for a ticker and look-back window.
    fn chart_url(ticker: &str, period: Period) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?interval=1d&range={period}&includePrePost=false&includeAdjustedClose=true"
        )
    }

    /// Parse the chart API response into bars (not yet canonical).
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<PriceBar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let offset = data.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);

        // A valid symbol with no trades in the window comes back without timestamps.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = local_date(ts, offset).ok_or_else(|| {
                DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
            })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();
            let adj_close = adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());

            // Skip bars where all OHLCV are None (holidays/non-trading days)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            let factor = adjustment(close, adj_close);
            let scale = |v: Option<f64>| v.map_or(f64::NAN, |v| v * factor);

            bars.push(PriceBar {
                date,
                open: scale(open),
                high: scale(high),
                low: scale(low),
                close: scale(close),
                volume: volume.unwrap_or(0),
            });
        }

        Ok(bars)
    }

    fn fetch_once(&self, ticker: &str, period: Period) -> Result<Vec<PriceBar>, DataError> {
        let url = Self::chart_url(ticker, period);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok());
        if let Some(err) = map_status(resp.status(), retry_after, ticker) {
            return Err(err);
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {ticker}: {e}"))
        })?;

        Self::parse_response(ticker, chart)
    }
}

/// Error for a non-success HTTP status, or `None` when the body should be parsed.
fn map_status(
    status: reqwest::StatusCode,
    retry_after: Option<&str>,
    ticker: &str,
) -> Option<DataError> {
    if status == reqwest::StatusCode::NOT_FOUND {
        return Some(DataError::SymbolNotFound {
            symbol: ticker.to_string(),
        });
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = retry_after
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(60);
        return Some(DataError::RateLimited { retry_after_secs });
    }

    if !status.is_success() {
        return Some(DataError::Http {
            status: status.as_u16(),
            symbol: ticker.to_string(),
        });
    }

    None
}

/// Dividend and split factor for one bar; 1.0 when either close is unusable.
fn adjustment(close: Option<f64>, adj_close: Option<f64>) -> f64 {
    match (close, adj_close) {
        (Some(c), Some(a)) if c.is_finite() && c > 0.0 && a.is_finite() && a > 0.0 => a / c,
        _ => 1.0,
    }
}

/// Calendar date of a UTC timestamp in the exchange's local time.
fn local_date(ts: i64, gmtoffset: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(ts.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}

impl QuoteSource for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, ticker: &str, period: Period) -> Result<PriceSeries, DataError> {
        tracing::info!(ticker, %period, "fetching daily bars");

        let raw = self.fetch_once(ticker, period)?;
        let (series, report) = PriceSeries::canonicalize(raw);

        if report.dropped() > 0 {
            tracing::warn!(
                ticker,
                duplicates = report.duplicates,
                voids = report.voids,
                "dropped bars while canonicalizing"
            );
        }

        if series.is_empty() {
            return Err(DataError::NoData {
                symbol: ticker.to_string(),
            });
        }

        tracing::info!(ticker, bars = series.len(), "fetch complete");
        Ok(series)
    }
}
