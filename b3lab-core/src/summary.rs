//! Summary builder - the fixed 11-row statistics table for one session.
//!
//! Values are pre-formatted strings: prices and percentages with 2 decimals,
//! volumes with 0. A row whose derived series is empty shows "N/A".

use std::fmt;

use crate::domain::Session;
use crate::metrics;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Value of the row with the given label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

pub const CURRENT_PRICE: &str = "Preço Atual (R$)";
pub const INITIAL_PRICE: &str = "Preço Inicial (R$)";
pub const PERIOD_CHANGE: &str = "Variação no Período (%)";
pub const MAX_PRICE: &str = "Maior Preço (R$)";
pub const MIN_PRICE: &str = "Menor Preço (R$)";
pub const AVG_VOLUME: &str = "Volume Médio Diário";
pub const MEAN_DAILY_RETURN: &str = "Retorno Médio Diário (%)";
pub const MEAN_WEEKLY_RETURN: &str = "Retorno Médio Semanal (%)";
pub const WEEKLY_VOLATILITY: &str = "Volatilidade Semanal (%)";
pub const MONTHLY_VOLATILITY: &str = "Volatilidade Mensal (%)";
pub const LAST_VOLUME: &str = "Último Volume";

fn fmt2(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn fmt0(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.0}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Build the summary table for the loaded session.
///
/// `weekly_window` and `monthly_window` are the rolling volatility windows
/// (7 and 30 trading days by default).
pub fn build_summary(
    session: &Session,
    weekly_window: usize,
    monthly_window: usize,
) -> SummaryTable {
    let series = &session.series;
    let bars = series.bars();

    let last = series.last().map(|b| b.close);
    let first = series.first().map(|b| b.close);
    let change = match (first, last) {
        (Some(f), Some(l)) => Some((l - f) / f * 100.0),
        _ => None,
    };

    let max_high = bars.iter().map(|b| b.high).filter(|v| !v.is_nan()).reduce(f64::max);
    let min_low = bars.iter().map(|b| b.low).filter(|v| !v.is_nan()).reduce(f64::min);
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();

    let daily = metrics::daily_returns(series);
    let weekly = metrics::weekly_returns(series);
    let vol_week = metrics::rolling_volatility(&daily, weekly_window);
    let vol_month = metrics::rolling_volatility(&daily, monthly_window);

    let row = |label, value| SummaryRow { label, value };

    SummaryTable {
        rows: vec![
            row(CURRENT_PRICE, fmt2(last)),
            row(INITIAL_PRICE, fmt2(first)),
            row(PERIOD_CHANGE, fmt2(change)),
            row(MAX_PRICE, fmt2(max_high)),
            row(MIN_PRICE, fmt2(min_low)),
            row(AVG_VOLUME, fmt0(metrics::mean(&volumes))),
            row(MEAN_DAILY_RETURN, fmt2(metrics::mean(&metrics::values(&daily)))),
            row(MEAN_WEEKLY_RETURN, fmt2(metrics::mean(&metrics::values(&weekly)))),
            row(WEEKLY_VOLATILITY, fmt2(metrics::last_value(&vol_week))),
            row(MONTHLY_VOLATILITY, fmt2(metrics::last_value(&vol_month))),
            row(LAST_VOLUME, fmt0(series.last().map(|b| b.volume as f64))),
        ],
    }
}

impl fmt::Display for SummaryTable {
    /// Two right-aligned columns with a `Métrica  Valor` header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_w = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .chain(std::iter::once("Métrica".chars().count()))
            .max()
            .unwrap_or(0);
        let value_w = self
            .rows
            .iter()
            .map(|r| r.value.chars().count())
            .chain(std::iter::once("Valor".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:>label_w$} {:>value_w$}", "Métrica", "Valor")?;
        for r in &self.rows {
            writeln!(f, "{:>label_w$} {:>value_w$}", r.label, r.value)?;
        }
        Ok(())
    }
}
