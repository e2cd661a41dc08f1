//! Application configuration.
//!
//! The defaults (fetch window, volatility windows, chart tails and both
//! company lists) live in `config/b3lab.toml`, compiled into the binary.
//! Nothing is read from disk at runtime.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{Catalog, Period};

const EMBEDDED: &str = include_str!("../config/b3lab.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub period: Period,
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Rolling windows, in trading days, for the summary's volatility rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityConfig {
    pub weekly_window: usize,
    pub monthly_window: usize,
}

/// How many trailing points each chart view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub week_tail: usize,
    pub month_tail: usize,
    pub daily_return_tail: usize,
    pub poll_interval_ms: u64,
}

impl ChartConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub volatility: VolatilityConfig,
    pub charts: ChartConfig,
    pub markets: Catalog,
}

impl AppConfig {
    /// Parse a configuration document and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(EMBEDDED)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.volatility.weekly_window < 2 || self.volatility.monthly_window < 2 {
            return Err(ConfigError::Invalid(
                "volatility windows must be at least 2 (sample std-dev)".into(),
            ));
        }
        if self.charts.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("charts.poll_interval_ms must be > 0".into()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch.timeout_secs must be > 0".into()));
        }
        self.markets.validate().map_err(ConfigError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Market;

    #[test]
    fn embedded_config_loads() {
        let config = AppConfig::embedded().unwrap();
        assert_eq!(config.fetch.period, Period::SixMonths);
        assert_eq!(config.volatility.weekly_window, 7);
        assert_eq!(config.volatility.monthly_window, 30);
        assert_eq!(config.charts.daily_return_tail, 28);
        assert_eq!(config.charts.poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn embedded_catalog_has_ten_companies_per_market() {
        let config = AppConfig::embedded().unwrap();
        assert_eq!(config.markets.companies(Market::Brazilian).len(), 10);
        assert_eq!(config.markets.companies(Market::Foreign).len(), 10);
        let petr = config.markets.by_rank(Market::Brazilian, 1).unwrap();
        assert_eq!(petr.name, "Petrobras");
        assert_eq!(petr.ticker, "PETR4.SA");
        let disney = config.markets.by_rank(Market::Foreign, 10).unwrap();
        assert_eq!(disney.ticker, "DISB34.SA");
    }

    #[test]
    fn every_ticker_is_b3_suffixed() {
        let config = AppConfig::embedded().unwrap();
        for market in [Market::Brazilian, Market::Foreign] {
            for c in config.markets.companies(market) {
                assert!(c.ticker.ends_with(".SA"), "{}", c.ticker);
            }
        }
    }

    #[test]
    fn window_below_two_is_rejected() {
        let doc = EMBEDDED.replace("weekly_window = 7", "weekly_window = 1");
        let err = AppConfig::from_toml(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_period_fails_to_parse() {
        let doc = EMBEDDED.replace("period = \"6mo\"", "period = \"7w\"");
        assert!(matches!(AppConfig::from_toml(&doc), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn one_year_period_is_accepted() {
        let doc = EMBEDDED.replace("period = \"6mo\"", "period = \"1y\"");
        assert_eq!(AppConfig::from_toml(&doc).unwrap().fetch.period, Period::OneYear);
    }
}
