//! B3Lab TUI - console menus and terminal charts
//!
//! Provides the interactive side of B3Lab:
//! - Navigation state machine (market, company, analysis)
//! - Menu loop over any `BufRead`/`Write` pair
//! - Chart views for volatility and returns
//! - Ratatui chart rendering with hover tooltips

pub mod app;
pub mod menus;
pub mod navigation;
pub mod panels;
pub mod render;
pub mod theme;
pub mod views;

pub use app::App;
pub use navigation::{Navigator, Outcome, Screen, View};
pub use render::{ChartHandle, ChartSurface, RenderContext, TerminalSurface};
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
