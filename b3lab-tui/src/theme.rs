//! Parrot/neon theme tokens for B3Lab charts
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (cumulative return, focus)
//! - **Positive**: Neon green (gains, minimum volatility)
//! - **Negative**: Hot pink (losses, weekly volatility, maximum volatility)
//! - **Warning**: Neon orange (monthly volatility)
//! - **Neutral**: Cool purple (value labels, tooltips)
//! - **Muted**: Steel blue (axes, zero line)

use ratatui::style::Color;

use crate::views::Tone;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (positive values, gains)
    pub positive: Color,
    /// Hot pink (negative values, losses)
    pub negative: Color,
    /// Neon orange (warnings, alerts)
    pub warning: Color,
    /// Cool purple (neutral info, secondary)
    pub neutral: Color,
    /// Steel blue (muted text, axes)
    pub muted: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Accent => self.accent,
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Warning => self.warning,
            Tone::Neutral => self.neutral,
            Tone::Muted => self.muted,
        }
    }
}
