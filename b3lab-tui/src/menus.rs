//! Console menu text for each screen.

use std::io::{self, Write};

use b3lab_core::data::{Catalog, Market};
use b3lab_core::domain::Session;
use b3lab_core::summary::SummaryTable;

use crate::navigation::View;

pub const RULE_WIDTH: usize = 60;

fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn main_menu(out: &mut impl Write) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "SISTEMA DE ANÁLISE FINANCEIRA B3")?;
    rule(out)?;
    writeln!(out, "1 - Listar as 10 maiores empresas brasileiras listadas na B3")?;
    writeln!(out, "2 - Listar as 10 maiores empresas estrangeiras listadas na B3")?;
    writeln!(out, "s - Sair/fechar aplicação")?;
    rule(out)
}

pub fn ticker_menu(out: &mut impl Write, catalog: &Catalog, market: Market) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "🏢 10 MAIORES EMPRESAS {} LISTADAS NA B3", market.title())?;
    rule(out)?;
    for company in catalog.companies(market) {
        writeln!(out, "{:2} - {} ({})", company.rank, company.name, company.ticker)?;
    }
    writeln!(out, "r  - Retornar ao menu principal")?;
    writeln!(out, "s  - Sair/fechar aplicação")?;
    rule(out)
}

/// The per-company menu. Without a session it still lists the options so a
/// choice can be rejected with the "no data" message.
pub fn company_menu(out: &mut impl Write, session: Option<&Session>) -> io::Result<()> {
    rule(out)?;
    match session {
        Some(s) => writeln!(out, "📈 MENU AÇÃO: {}", s.label())?,
        None => writeln!(out, "📈 MENU AÇÃO")?,
    }
    rule(out)?;
    for view in View::ALL {
        writeln!(out, "{} - {}", view.option(), view.label())?;
    }
    writeln!(out, "r - Retornar ao menu anterior")?;
    writeln!(out, "s - Sair/fechar aplicação")?;
    rule(out)
}

pub fn summary(out: &mut impl Write, session: &Session, table: &SummaryTable) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "RESUMO - {}", session.label())?;
    rule(out)?;
    write!(out, "{table}")?;
    rule(out)
}
