//! Market data: quote sources and the company catalog

pub mod catalog;
pub mod provider;
pub mod yahoo;

pub use catalog::{Catalog, Company, Market};
pub use provider::{DataError, Period, QuoteSource};
pub use yahoo::YahooProvider;
