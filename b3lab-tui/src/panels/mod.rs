//! TUI panels
//!
//! - Chart: one analysis chart with annotations and hover tooltip

pub mod chart;

pub use chart::{ChartPanel, PlotArea};
