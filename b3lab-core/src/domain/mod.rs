//! Domain types for B3Lab

pub mod bar;
pub mod series;
pub mod session;

pub use bar::PriceBar;
pub use series::{CanonicalReport, PriceSeries};
pub use session::Session;
