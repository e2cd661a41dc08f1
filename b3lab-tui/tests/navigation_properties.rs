//! Property tests for the navigation controller and chart hover.
//!
//! Uses proptest to verify:
//! 1. Arbitrary input never panics and never leaves the screen graph
//! 2. `s` exits from wherever a random walk ended up
//! 3. Hover on a date axis always lands on a plotted point

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use b3lab_core::data::{DataError, Period, QuoteSource};
use b3lab_core::domain::{PriceBar, PriceSeries, Session};
use b3lab_core::AppConfig;
use b3lab_tui::views;
use b3lab_tui::{Navigator, Outcome, Screen, View};

struct FlatSource;

impl QuoteSource for FlatSource {
    fn name(&self) -> &str {
        "flat"
    }

    fn fetch(&self, _ticker: &str, _period: Period) -> Result<PriceSeries, DataError> {
        Ok(series(&[10.0, 10.5, 10.2, 10.8, 11.0, 10.9, 11.3, 11.1, 11.6, 11.4]))
    }
}

fn series(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    PriceSeries::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: start + Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 1,
            })
            .collect(),
    )
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (1u32..=11).prop_map(|n| n.to_string()),
        1 => Just("r".to_string()),
        1 => "[a-zA-Z0-9 ]{0,4}".prop_filter("no stop", |s| s.trim().to_lowercase() != "s"),
    ]
}

/// Feed `inputs`, completing fetches and dismissing views like the menu loop does.
fn walk(nav: &mut Navigator, inputs: &[String]) {
    for input in inputs {
        match nav.handle(input) {
            Outcome::Fetch(company) => {
                nav.load(&company, &FlatSource);
            }
            Outcome::ShowView(_) => nav.dismiss_view(),
            _ => {}
        }
    }
}

// ── 1. Random walks stay on the graph ────────────────────────────────

proptest! {
    #[test]
    fn random_input_keeps_a_reachable_screen(inputs in prop::collection::vec(arb_input(), 0..40)) {
        let config = AppConfig::embedded().unwrap();
        let mut nav = Navigator::new(config.markets, config.fetch.period);
        walk(&mut nav, &inputs);

        match nav.screen() {
            Screen::MainMenu | Screen::TickerMenu(_) => {}
            Screen::CompanyDetail(_) => prop_assert!(nav.session().is_some()),
            other => prop_assert!(false, "unexpected resting screen {:?}", other),
        }
    }
}

// ── 2. Stop always exits ─────────────────────────────────────────────

proptest! {
    #[test]
    fn stop_exits_from_any_depth(inputs in prop::collection::vec(arb_input(), 0..40)) {
        let config = AppConfig::embedded().unwrap();
        let mut nav = Navigator::new(config.markets, config.fetch.period);
        walk(&mut nav, &inputs);

        prop_assert_eq!(nav.handle("s"), Outcome::Exit);
        prop_assert_eq!(nav.screen(), Screen::Exit);
    }
}

// ── 3. Hover ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn hover_lands_on_a_plotted_point(
        closes in prop::collection::vec(1.0..100.0_f64, 2..60),
        frac in 0.0..=1.0_f64,
    ) {
        let config = AppConfig::embedded().unwrap();
        let session = Session::new("PETR4.SA", "Petrobras", series(&closes));
        let spec = views::build(View::MonthlyReturn, &session, &config).unwrap();

        let [x0, x1] = spec.x_bounds();
        let tip = spec.hover_at(x0 + frac * (x1 - x0)).unwrap();
        prop_assert!((0..spec.points.len()).any(|i| spec.x_of(i) == tip.x));
        prop_assert!(tip.value.ends_with('%'));
    }
}
