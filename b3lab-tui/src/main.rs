//! B3Lab - interactive analysis of the largest companies listed on B3.
//!
//! Console menus pick a market and a company; the chosen ticker's last six
//! months of daily quotes feed a summary table and four terminal charts.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use b3lab_core::data::YahooProvider;
use b3lab_core::{AppConfig, ConfigError};
use b3lab_tui::render::{self, RenderContext, TerminalSurface};
use b3lab_tui::App;

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuração inválida: {0}")]
    Config(#[from] ConfigError),
    #[error("não foi possível criar o cliente HTTP: {0}")]
    HttpClient(String),
    #[error("não foi possível instalar o tratador de Ctrl-C: {0}")]
    Interrupt(#[from] ctrlc::Error),
    #[error("terminal indisponível: {0}")]
    Terminal(#[from] io::Error),
}

fn main() -> ExitCode {
    // Logs go to stderr so the menus on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    println!("🔧 Verificando configurações...");
    let (config, source) = match startup() {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            println!("❌ Erro de inicialização: {e}");
            wait_for_enter("Pressione Enter para sair...");
            return ExitCode::FAILURE;
        }
    };
    println!("✅ Todas as bibliotecas carregadas com sucesso!");
    println!("🚀 Iniciando Sistema de Análise Financeira B3...");
    println!("Interface gráfica configurada com sucesso!");
    wait_for_enter("Pressione Enter para continuar...");

    let ctx = RenderContext::new(&config.charts);
    let result = {
        let surface = TerminalSurface::new(&ctx);
        let stdin = io::stdin();
        let mut app = App::new(&config, &source, surface, stdin.lock(), io::stdout());
        app.run()
    };
    ctx.teardown();

    if let Err(e) = result {
        tracing::error!(error = %e, "unexpected failure");
        println!("Erro inesperado: {e}");
        wait_for_enter("Pressione Enter para sair...");
    }
    ExitCode::SUCCESS
}

fn startup() -> Result<(AppConfig, YahooProvider), StartupError> {
    let config = AppConfig::embedded()?;
    let source = YahooProvider::new(config.fetch.timeout())
        .map_err(|e| StartupError::HttpClient(e.to_string()))?;
    ctrlc::set_handler(|| render::interrupt_exit())?;
    let (cols, rows) = crossterm::terminal::size()?;
    tracing::info!(cols, rows, period = %config.fetch.period, "startup complete");
    Ok((config, source))
}

fn wait_for_enter(prompt: &str) {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
