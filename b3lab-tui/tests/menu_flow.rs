//! Whole menu sessions driven by scripted stdin.
//!
//! A mock quote source serves canned series and a scripted chart surface
//! records every chart it is asked to show.

use std::collections::HashMap;
use std::io::{self, Cursor};

use chrono::{Duration, NaiveDate};

use b3lab_core::data::{DataError, Period, QuoteSource};
use b3lab_core::domain::{PriceBar, PriceSeries};
use b3lab_core::AppConfig;
use b3lab_tui::views::{ChartKind, ChartSpec};
use b3lab_tui::{App, ChartHandle, ChartSurface, Screen};

// ── Fixtures ─────────────────────────────────────────────────────────

struct MockSource {
    series: HashMap<&'static str, PriceSeries>,
    fail: HashMap<&'static str, &'static str>,
}

impl MockSource {
    fn new() -> Self {
        let mut series = HashMap::new();
        series.insert("PETR4.SA", daily(90, 38.0));
        series.insert("AAPL34.SA", daily(120, 61.0));
        let mut fail = HashMap::new();
        fail.insert("VALE3.SA", "dns error");
        Self { series, fail }
    }
}

impl QuoteSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch(&self, ticker: &str, period: Period) -> Result<PriceSeries, DataError> {
        assert_eq!(period, Period::SixMonths);
        if let Some(msg) = self.fail.get(ticker) {
            return Err(DataError::NetworkUnreachable(msg.to_string()));
        }
        match self.series.get(ticker) {
            Some(s) => Ok(s.clone()),
            None => Err(DataError::NoData {
                symbol: ticker.to_string(),
            }),
        }
    }
}

fn daily(n: usize, base: f64) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    PriceSeries::new(
        (0..n)
            .map(|i| {
                let close = base * (1.0 + 0.01 * ((i % 7) as f64 - 3.0));
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open: close,
                    high: close * 1.01,
                    low: close * 0.99,
                    close,
                    volume: 500_000,
                }
            })
            .collect(),
    )
}

/// Records opened charts; each stays open for `polls` checks.
struct ScriptedSurface {
    polls: usize,
    remaining: usize,
    opened: Vec<ChartSpec>,
}

impl ScriptedSurface {
    fn new(polls: usize) -> Self {
        Self {
            polls,
            remaining: 0,
            opened: Vec::new(),
        }
    }
}

impl ChartSurface for ScriptedSurface {
    fn open(&mut self, spec: &ChartSpec) -> io::Result<ChartHandle> {
        self.opened.push(spec.clone());
        self.remaining = self.polls;
        Ok(ChartHandle(self.opened.len() as u64))
    }

    fn is_open(&mut self, _handle: &ChartHandle) -> io::Result<bool> {
        if self.remaining == 0 {
            return Ok(false);
        }
        self.remaining -= 1;
        Ok(true)
    }
}

struct Run {
    out: String,
    surface: ScriptedSurface,
    screen: Screen,
    session_ticker: Option<String>,
}

fn run(script: &str) -> Run {
    let config = AppConfig::embedded().unwrap();
    let source = MockSource::new();
    let mut surface = ScriptedSurface::new(3);
    let mut out = Vec::new();
    let (screen, session_ticker) = {
        let input = Cursor::new(script.to_string());
        let mut app = App::new(&config, &source, &mut surface, input, &mut out);
        app.run().unwrap();
        let nav = app.navigator();
        (nav.screen(), nav.session().map(|s| s.ticker.clone()))
    };
    Run {
        out: String::from_utf8(out).unwrap(),
        surface,
        screen,
        session_ticker,
    }
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn stop_from_main_menu() {
    let r = run("s\n");
    assert_eq!(r.screen, Screen::Exit);
    assert!(r.out.contains("Encerrando aplicação..."));
    assert!(r.session_ticker.is_none());
}

#[test]
fn select_then_return_twice_reaches_main_menu() {
    // Brazilian list, Petrobras, back to the list, back to the main menu
    let r = run("1\n1\nr\nr\ns\n");
    assert_eq!(r.screen, Screen::Exit);
    assert_eq!(r.session_ticker.as_deref(), Some("PETR4.SA"));
    assert_eq!(r.out.matches("SISTEMA DE ANÁLISE FINANCEIRA B3").count(), 2);
    assert!(r.out.contains("📈 MENU AÇÃO: Petrobras (PETR4.SA)"));
}

#[test]
fn empty_fetch_stays_at_ticker_menu() {
    // Itaú has no canned series
    let r = run("1\n3\n\n");
    assert!(r.out.contains("❌ Nenhum dado encontrado para ITUB4.SA"));
    assert!(r.out.contains("Erro ao carregar dados. Pressione Enter para continuar..."));
    assert_eq!(r.out.matches("10 MAIORES EMPRESAS BRASILEIRAS").count(), 2);
    assert!(r.session_ticker.is_none());
}

#[test]
fn network_failure_keeps_previous_session() {
    let r = run("1\n1\nr\n2\n\ns\n");
    assert!(r.out.contains("Erro ao baixar dados: "));
    assert!(r.out.contains("dns error"));
    assert_eq!(r.session_ticker.as_deref(), Some("PETR4.SA"));
}

#[test]
fn summary_view_prints_table() {
    let r = run("2\n1\n1\n\ns\n");
    assert!(r.out.contains("Dados baixados: 120 registros"));
    assert!(r.out.contains("RESUMO - Apple (AAPL34.SA)"));
    assert!(r.out.contains("Volatilidade Mensal (%)"));
    assert!(r.out.contains("Último Volume"));
    assert!(r.out.contains("500000"));
    assert!(r.surface.opened.is_empty());
}

#[test]
fn every_chart_view_opens_and_closes() {
    let r = run("1\n1\n2\n3\n4\n5\ns\n");
    let titles: Vec<&str> = r.surface.opened.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Volatilidade - Última Semana",
            "Volatilidade - Último Mês",
            "Retornos Diários - Últimas 4 Semanas",
            "Retorno Acumulado - Período Completo",
        ]
    );
    assert_eq!(r.out.matches("✅ Gráfico fechado. Continuando...").count(), 4);
    assert_eq!(r.surface.opened[2].kind, ChartKind::Bar);
    assert_eq!(r.surface.opened[2].points.len(), 28);
    assert!(r.surface.opened.iter().all(|s| s.subtitle == "Petrobras (PETR4.SA)"));
}

#[test]
fn invalid_inputs_never_change_screen() {
    let r = run("x\n\n1\n42\n\n01\n\nr\nr\n\ns\n");
    assert_eq!(r.out.matches("Opção inválida!").count(), 4);
    assert!(r.session_ticker.is_none());
    assert_eq!(r.screen, Screen::Exit);
}

#[test]
fn uppercase_and_padded_input_is_accepted() {
    let r = run(" 2 \n 1\nR\nS\n");
    assert_eq!(r.session_ticker.as_deref(), Some("AAPL34.SA"));
    assert!(r.out.contains("10 MAIORES EMPRESAS ESTRANGEIRAS"));
    assert_eq!(r.screen, Screen::Exit);
}
