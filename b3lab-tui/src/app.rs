//! Console menu loop.
//!
//! Generic over its input, output and chart surface so whole sessions can be
//! scripted in tests.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use b3lab_core::data::{Company, QuoteSource};
use b3lab_core::summary::build_summary;
use b3lab_core::AppConfig;

use crate::menus;
use crate::navigation::{Navigator, Outcome, Screen, View};
use crate::render::ChartSurface;
use crate::views;

const PROMPT: &str = "Escolha uma opção: ";
const CONTINUE: &str = "Pressione Enter para continuar...";

pub struct App<'a, R, W, S> {
    nav: Navigator,
    config: &'a AppConfig,
    source: &'a dyn QuoteSource,
    surface: S,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write, S: ChartSurface> App<'a, R, W, S> {
    pub fn new(
        config: &'a AppConfig,
        source: &'a dyn QuoteSource,
        surface: S,
        input: R,
        out: W,
    ) -> Self {
        Self {
            nav: Navigator::new(config.markets.clone(), config.fetch.period),
            config,
            source,
            surface,
            input,
            out,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.clear()?;
            self.print_menu()?;

            let outcome = match self.read_line(PROMPT)? {
                Some(line) => self.nav.handle(&line),
                None => Outcome::Exit,
            };

            match outcome {
                Outcome::Exit => {
                    writeln!(self.out, "Encerrando aplicação...")?;
                    self.out.flush()?;
                    return Ok(());
                }
                Outcome::Moved => {}
                Outcome::Invalid => {
                    writeln!(self.out, "Opção inválida!")?;
                    self.pause(CONTINUE)?;
                }
                Outcome::NoData => {
                    if let Err(e) = self.nav.require_session() {
                        writeln!(self.out, "{e}")?;
                    }
                    self.pause(CONTINUE)?;
                }
                Outcome::Fetch(company) => self.fetch(&company)?,
                Outcome::ShowView(view) => {
                    self.present(view)?;
                    self.nav.dismiss_view();
                }
                Outcome::Loaded { .. } | Outcome::FetchFailed { .. } => {}
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        match self.nav.screen() {
            Screen::MainMenu => menus::main_menu(&mut self.out),
            Screen::TickerMenu(market) => {
                menus::ticker_menu(&mut self.out, self.nav.catalog(), market)
            }
            Screen::CompanyDetail(_) | Screen::View(..) => {
                menus::company_menu(&mut self.out, self.nav.session())
            }
            Screen::Exit => Ok(()),
        }
    }

    fn fetch(&mut self, company: &Company) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "📥 Baixando dados de {} ({})...", company.name, company.ticker)?;
        self.out.flush()?;
        tracing::info!(ticker = %company.ticker, source = self.source.name(), "fetching quotes");

        match self.nav.load(company, self.source) {
            Outcome::Loaded { ticker, bars } => {
                tracing::info!(%ticker, bars, "quotes loaded");
                writeln!(self.out, "Dados baixados: {bars} registros")?;
                Ok(())
            }
            Outcome::FetchFailed { ticker, error, no_data } => {
                if no_data {
                    writeln!(self.out, "❌ Nenhum dado encontrado para {ticker}")?;
                } else {
                    writeln!(self.out, "Erro ao baixar dados: {error}")?;
                }
                self.pause("Erro ao carregar dados. Pressione Enter para continuar...")
            }
            _ => Ok(()),
        }
    }

    fn present(&mut self, view: View) -> io::Result<()> {
        let session = match self.nav.require_session() {
            Ok(session) => session,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return self.pause(CONTINUE);
            }
        };

        if view == View::Summary {
            let vol = &self.config.volatility;
            let table = build_summary(session, vol.weekly_window, vol.monthly_window);
            menus::summary(&mut self.out, session, &table)?;
            return self.pause(&format!("\n📊 {CONTINUE}"));
        }

        let Some(spec) = views::build(view, session, self.config) else {
            writeln!(self.out, "Dados insuficientes para o gráfico.")?;
            return self.pause(CONTINUE);
        };

        let handle = self.surface.open(&spec)?;
        while self.surface.is_open(&handle)? {}
        writeln!(self.out, "✅ Gráfico fechado. Continuando...")?;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Wait for Enter. End of input is left for the next prompt to see.
    fn pause(&mut self, prompt: &str) -> io::Result<()> {
        self.read_line(prompt).map(|_| ())
    }
}
