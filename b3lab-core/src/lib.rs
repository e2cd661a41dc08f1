//! B3Lab Core - domain types, quote sources, metrics and summary.
//!
//! This crate contains everything that does not touch a terminal:
//! - Domain types (price bars, canonical price series, the analysis session)
//! - The `QuoteSource` trait and its Yahoo Finance implementation
//! - Pure metric functions (returns, rolling volatility, cumulative return)
//! - Hover queries used by charts
//! - The 11-row summary table
//! - Embedded configuration and company catalog

pub mod config;
pub mod data;
pub mod domain;
pub mod hover;
pub mod metrics;
pub mod summary;

pub use config::{AppConfig, ConfigError};
