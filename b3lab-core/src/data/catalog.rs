//! Company catalog - the two fixed, ranked ticker lists shown in the menus.
//!
//! Stored as TOML arrays of `{rank, name, ticker}` records so the order on
//! screen is exactly the order in the document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which list a ticker menu shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Brazilian,
    Foreign,
}

impl Market {
    /// Menu heading suffix: "BRASILEIRAS" / "ESTRANGEIRAS".
    pub fn title(self) -> &'static str {
        match self {
            Market::Brazilian => "BRASILEIRAS",
            Market::Foreign => "ESTRANGEIRAS",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Brazilian => f.write_str("brazilian"),
            Market::Foreign => f.write_str("foreign"),
        }
    }
}

/// A listed company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub rank: u32,
    pub name: String,
    pub ticker: String,
}

/// Both company lists, each ordered by rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub brazilian: Vec<Company>,
    pub foreign: Vec<Company>,
}

impl Catalog {
    pub fn companies(&self, market: Market) -> &[Company] {
        match market {
            Market::Brazilian => &self.brazilian,
            Market::Foreign => &self.foreign,
        }
    }

    /// Look up a company by its 1-based menu rank.
    pub fn by_rank(&self, market: Market, rank: u32) -> Option<&Company> {
        self.companies(market).iter().find(|c| c.rank == rank)
    }

    /// Check that each list is non-empty, ranked 1..=N in order and has tickers.
    pub fn validate(&self) -> Result<(), String> {
        for market in [Market::Brazilian, Market::Foreign] {
            let companies = self.companies(market);
            if companies.is_empty() {
                return Err(format!("{market} company list is empty"));
            }
            for (i, company) in companies.iter().enumerate() {
                let expected = i as u32 + 1;
                if company.rank != expected {
                    return Err(format!(
                        "{market} list: expected rank {expected}, found {} ({})",
                        company.rank, company.name
                    ));
                }
                if company.ticker.trim().is_empty() {
                    return Err(format!("{market} list: {} has no ticker", company.name));
                }
            }
        }
        Ok(())
    }
}
