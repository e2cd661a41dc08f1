//! Menu navigation state machine
//!
//! Maps one line of console input to a transition between screens and owns
//! the single analysis `Session`. Fetching is split in two steps so the
//! caller can announce a download before it blocks: `handle` returns
//! `Outcome::Fetch`, then `load` performs the single attempt.

use thiserror::Error;

use b3lab_core::data::{Catalog, Company, Market, Period, QuoteSource};
use b3lab_core::domain::Session;

/// The analyses offered for a loaded company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Summary,
    VolatilityWeek,
    VolatilityMonth,
    WeeklyReturn,
    MonthlyReturn,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Summary,
        View::VolatilityWeek,
        View::VolatilityMonth,
        View::WeeklyReturn,
        View::MonthlyReturn,
    ];

    /// Menu option number for this view.
    pub fn option(self) -> u32 {
        match self {
            View::Summary => 1,
            View::VolatilityWeek => 2,
            View::VolatilityMonth => 3,
            View::WeeklyReturn => 4,
            View::MonthlyReturn => 5,
        }
    }

    pub fn from_option(n: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.option() == n)
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Summary => "Resumo de informações das ações (tabela)",
            View::VolatilityWeek => "Gráfico de volatilidade da última semana",
            View::VolatilityMonth => "Gráfico de volatilidade do último mês",
            View::WeeklyReturn => "Gráfico de retorno semanal",
            View::MonthlyReturn => "Gráfico de retorno mensal",
        }
    }
}

/// Where the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    TickerMenu(Market),
    CompanyDetail(Market),
    View(Market, View),
    Exit,
}

/// What a single input produced. The caller reacts to it (print, fetch,
/// present a view) and the screen has already been updated.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Screen changed (or was re-entered); nothing else to do.
    Moved,
    /// A ticker was chosen; call `load` to fetch it.
    Fetch(Company),
    /// Fetch succeeded and the session was replaced.
    Loaded { ticker: String, bars: usize },
    /// Fetch failed; screen and session are unchanged.
    FetchFailed { ticker: String, error: String, no_data: bool },
    /// Unrecognized input; screen unchanged.
    Invalid,
    /// A view was entered and must be presented, then `dismiss_view` called.
    ShowView(View),
    /// A view was requested but no session is loaded.
    NoData,
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("Nenhuma ação carregada!")]
    NoDataLoaded,
}

/// The navigation controller.
pub struct Navigator {
    screen: Screen,
    session: Option<Session>,
    catalog: Catalog,
    period: Period,
}

impl Navigator {
    pub fn new(catalog: Catalog, period: Period) -> Self {
        Self {
            screen: Screen::MainMenu,
            session: None,
            catalog,
            period,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The loaded session, or `NoDataLoaded` before the first successful fetch.
    pub fn require_session(&self) -> Result<&Session, NavError> {
        self.session.as_ref().ok_or(NavError::NoDataLoaded)
    }

    /// Apply one line of input to the current screen.
    pub fn handle(&mut self, input: &str) -> Outcome {
        let choice = input.trim().to_lowercase();

        if choice == "s" {
            return self.go(Screen::Exit, Outcome::Exit);
        }

        match self.screen {
            Screen::MainMenu => match choice.as_str() {
                "1" => self.go(Screen::TickerMenu(Market::Brazilian), Outcome::Moved),
                "2" => self.go(Screen::TickerMenu(Market::Foreign), Outcome::Moved),
                _ => Outcome::Invalid,
            },
            Screen::TickerMenu(market) => {
                if choice == "r" {
                    return self.go(Screen::MainMenu, Outcome::Moved);
                }
                match parse_option(&choice).and_then(|n| self.catalog.by_rank(market, n)) {
                    Some(company) => Outcome::Fetch(company.clone()),
                    None => Outcome::Invalid,
                }
            }
            Screen::CompanyDetail(market) => {
                if choice == "r" {
                    return self.go(Screen::TickerMenu(market), Outcome::Moved);
                }
                match parse_option(&choice).and_then(View::from_option) {
                    Some(_) if self.session.is_none() => Outcome::NoData,
                    Some(view) => self.go(Screen::View(market, view), Outcome::ShowView(view)),
                    None => Outcome::Invalid,
                }
            }
            // Any key leaves a view, like "press Enter to continue".
            Screen::View(market, _) => self.go(Screen::CompanyDetail(market), Outcome::Moved),
            Screen::Exit => Outcome::Exit,
        }
    }

    /// Fetch `company` and, on success, replace the session and open its menu.
    ///
    /// On failure the screen stays at the ticker menu and the previous
    /// session (if any) is kept.
    pub fn load(&mut self, company: &Company, source: &dyn QuoteSource) -> Outcome {
        let Screen::TickerMenu(market) = self.screen else {
            return Outcome::Invalid;
        };

        match source.fetch(&company.ticker, self.period) {
            Ok(series) => {
                let bars = series.len();
                self.session = Some(Session::new(&company.ticker, &company.name, series));
                self.go(
                    Screen::CompanyDetail(market),
                    Outcome::Loaded {
                        ticker: company.ticker.clone(),
                        bars,
                    },
                )
            }
            Err(e) => {
                tracing::warn!(
                    ticker = %company.ticker,
                    source = source.name(),
                    error = %e,
                    "fetch failed"
                );
                Outcome::FetchFailed {
                    ticker: company.ticker.clone(),
                    no_data: matches!(
                        e,
                        b3lab_core::data::DataError::NoData { .. }
                            | b3lab_core::data::DataError::SymbolNotFound { .. }
                    ),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Return from a presented view to the company menu.
    pub fn dismiss_view(&mut self) {
        if let Screen::View(market, _) = self.screen {
            self.screen = Screen::CompanyDetail(market);
        }
    }

    fn go(&mut self, next: Screen, outcome: Outcome) -> Outcome {
        tracing::debug!(from = ?self.screen, to = ?next, "screen transition");
        self.screen = next;
        outcome
    }
}

/// Menu numbers are written exactly as listed: decimal digits, no sign and
/// no leading zero.
fn parse_option(choice: &str) -> Option<u32> {
    let canonical = !choice.starts_with('0') && choice.bytes().all(|b| b.is_ascii_digit());
    if choice.is_empty() || !canonical {
        return None;
    }
    choice.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{catalog, sample_series, StaticSource};

    fn nav() -> Navigator {
        Navigator::new(catalog(), Period::SixMonths)
    }

    #[test]
    fn starts_at_main_menu_without_session() {
        let nav = nav();
        assert_eq!(nav.screen(), Screen::MainMenu);
        assert!(nav.session().is_none());
        assert_eq!(nav.require_session().unwrap_err(), NavError::NoDataLoaded);
    }

    #[test]
    fn main_menu_opens_market_lists() {
        let mut nav = nav();
        assert_eq!(nav.handle("1"), Outcome::Moved);
        assert_eq!(nav.screen(), Screen::TickerMenu(Market::Brazilian));
        nav.handle("r");
        assert_eq!(nav.handle(" 2 "), Outcome::Moved);
        assert_eq!(nav.screen(), Screen::TickerMenu(Market::Foreign));
    }

    #[test]
    fn invalid_input_keeps_screen() {
        let mut nav = nav();
        for input in ["", "3", "r", "x", "01a"] {
            assert_eq!(nav.handle(input), Outcome::Invalid, "{input:?}");
            assert_eq!(nav.screen(), Screen::MainMenu);
        }
        nav.handle("1");
        for input in ["0", "01", "010", "11", "-1", "+1", "abc"] {
            assert_eq!(nav.handle(input), Outcome::Invalid, "{input:?}");
            assert_eq!(nav.screen(), Screen::TickerMenu(Market::Brazilian));
        }
    }

    #[test]
    fn padded_view_numbers_are_rejected() {
        let source = StaticSource::with("PETR4.SA", sample_series(10));
        let mut nav = nav();
        nav.handle("1");
        let Outcome::Fetch(c) = nav.handle("1") else { panic!() };
        nav.load(&c, &source);
        for input in ["01", "05", "00"] {
            assert_eq!(nav.handle(input), Outcome::Invalid, "{input:?}");
            assert_eq!(nav.screen(), Screen::CompanyDetail(Market::Brazilian));
        }
        assert_eq!(nav.handle("5"), Outcome::ShowView(View::MonthlyReturn));
    }

    #[test]
    fn stop_exits_from_any_depth() {
        let source = StaticSource::with("PETR4.SA", sample_series(10));
        let mut nav = nav();
        assert_eq!(nav.handle("S"), Outcome::Exit);
        assert_eq!(nav.screen(), Screen::Exit);

        let mut nav = Navigator::new(catalog(), Period::SixMonths);
        nav.handle("1");
        if let Outcome::Fetch(c) = nav.handle("1") {
            nav.load(&c, &source);
        }
        assert_eq!(nav.screen(), Screen::CompanyDetail(Market::Brazilian));
        assert_eq!(nav.handle("s"), Outcome::Exit);
        assert_eq!(nav.screen(), Screen::Exit);
    }

    #[test]
    fn select_then_return_twice_is_main_menu() {
        let source = StaticSource::with("VALE3.SA", sample_series(20));
        let mut nav = nav();
        nav.handle("1");
        let Outcome::Fetch(company) = nav.handle("2") else {
            panic!("expected a fetch request");
        };
        assert_eq!(company.ticker, "VALE3.SA");
        assert_eq!(
            nav.load(&company, &source),
            Outcome::Loaded {
                ticker: "VALE3.SA".into(),
                bars: 20
            }
        );
        assert_eq!(nav.screen(), Screen::CompanyDetail(Market::Brazilian));
        assert_eq!(nav.session().unwrap().company_name, "Vale");

        nav.handle("r");
        assert_eq!(nav.screen(), Screen::TickerMenu(Market::Brazilian));
        nav.handle("r");
        assert_eq!(nav.screen(), Screen::MainMenu);
    }

    #[test]
    fn failed_fetch_stays_and_keeps_previous_session() {
        let source = StaticSource::with("PETR4.SA", sample_series(15));
        let mut nav = nav();
        nav.handle("1");
        let Outcome::Fetch(petr) = nav.handle("1") else { panic!() };
        nav.load(&petr, &source);
        nav.handle("r");

        let Outcome::Fetch(vale) = nav.handle("2") else { panic!() };
        let outcome = nav.load(&vale, &source);
        assert!(matches!(
            outcome,
            Outcome::FetchFailed { ref ticker, no_data: true, .. } if ticker == "VALE3.SA"
        ));
        assert_eq!(nav.screen(), Screen::TickerMenu(Market::Brazilian));
        assert_eq!(nav.session().unwrap().ticker, "PETR4.SA");
    }

    #[test]
    fn new_selection_replaces_session() {
        let source = StaticSource::with("PETR4.SA", sample_series(15))
            .and("VALE3.SA", sample_series(30));
        let mut nav = nav();
        nav.handle("1");
        let Outcome::Fetch(petr) = nav.handle("1") else { panic!() };
        nav.load(&petr, &source);
        nav.handle("r");
        let Outcome::Fetch(vale) = nav.handle("2") else { panic!() };
        nav.load(&vale, &source);

        let session = nav.session().unwrap();
        assert_eq!(session.ticker, "VALE3.SA");
        assert_eq!(session.series.len(), 30);
    }

    #[test]
    fn detail_menu_enters_and_dismisses_views() {
        let source = StaticSource::with("AAPL34.SA", sample_series(40));
        let mut nav = nav();
        nav.handle("2");
        let Outcome::Fetch(apple) = nav.handle("1") else { panic!() };
        nav.load(&apple, &source);

        for view in View::ALL {
            let outcome = nav.handle(&view.option().to_string());
            assert_eq!(outcome, Outcome::ShowView(view));
            assert_eq!(nav.screen(), Screen::View(Market::Foreign, view));
            nav.dismiss_view();
            assert_eq!(nav.screen(), Screen::CompanyDetail(Market::Foreign));
        }

        assert_eq!(nav.handle("6"), Outcome::Invalid);
        assert_eq!(nav.screen(), Screen::CompanyDetail(Market::Foreign));
    }

    #[test]
    fn any_input_leaves_a_view() {
        let source = StaticSource::with("AAPL34.SA", sample_series(40));
        let mut nav = nav();
        nav.handle("2");
        let Outcome::Fetch(apple) = nav.handle("1") else { panic!() };
        nav.load(&apple, &source);
        nav.handle("3");
        assert_eq!(nav.handle("anything"), Outcome::Moved);
        assert_eq!(nav.screen(), Screen::CompanyDetail(Market::Foreign));
    }

    #[test]
    fn load_outside_ticker_menu_is_ignored() {
        let source = StaticSource::with("PETR4.SA", sample_series(5));
        let mut nav = nav();
        let company = nav.catalog().by_rank(Market::Brazilian, 1).unwrap().clone();
        assert_eq!(nav.load(&company, &source), Outcome::Invalid);
        assert!(nav.session().is_none());
    }

    #[test]
    fn view_options_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_option(view.option()), Some(view));
        }
        assert_eq!(View::from_option(0), None);
    }
}
