//! PriceSeries - the canonical, date-ordered bars of one fetch window.

use super::bar::PriceBar;

/// How many input bars were discarded while canonicalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalReport {
    pub duplicates: usize,
    pub voids: usize,
}

impl CanonicalReport {
    pub fn dropped(&self) -> usize {
        self.duplicates + self.voids
    }
}

/// Ordered bars for a single ticker.
///
/// Construction sorts ascending by date, keeps the last bar for a repeated
/// date and drops void bars, so every consumer can rely on strictly
/// increasing dates and positive closes.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Canonicalize raw provider bars into a series.
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self::canonicalize(bars).0
    }

    /// Canonicalize and also report what was dropped.
    pub fn canonicalize(mut bars: Vec<PriceBar>) -> (Self, CanonicalReport) {
        let mut report = CanonicalReport::default();

        let before = bars.len();
        bars.retain(|b| !b.is_void());
        report.voids = before - bars.len();

        // Stable sort so that, among equal dates, provider order is kept and
        // the later (most recent revision) bar wins below.
        bars.sort_by_key(|b| b.date);

        let mut out: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match out.last_mut() {
                Some(last) if last.date == bar.date => {
                    *last = bar;
                    report.duplicates += 1;
                }
                _ => out.push(bar),
            }
        }

        (Self { bars: out }, report)
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}
