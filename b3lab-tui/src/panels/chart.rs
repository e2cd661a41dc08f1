//! Chart panel - one analysis chart with value labels and a hover tooltip
//!
//! Displays:
//! - The view's series as a line, filled line or signed bars
//! - Zero line where the view asks for one
//! - Point annotations (value labels, extremes, final value)
//! - Tooltip for the point under the cursor column

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::theme::Theme;
use crate::views::{ChartKind, ChartSpec};

const Y_LABELS: usize = 5;
const X_LABELS: usize = 6;

/// Chart panel widget
pub struct ChartPanel<'a> {
    spec: &'a ChartSpec,
    theme: &'a Theme,
    cursor: Option<u16>,
}

impl<'a> ChartPanel<'a> {
    pub fn new(spec: &'a ChartSpec, theme: &'a Theme) -> Self {
        Self {
            spec,
            theme,
            cursor: None,
        }
    }

    /// Terminal column the pointer is on.
    pub fn cursor(mut self, column: Option<u16>) -> Self {
        self.cursor = column;
        self
    }

    /// Plot rectangle the chart will use inside `area`.
    ///
    /// Ratatui's Chart does not expose its graph area, so this mirrors its
    /// layout: y labels on the left, axis line plus labels at the bottom and a
    /// title row on top.
    pub fn plot_area(spec: &ChartSpec, area: Rect) -> Option<PlotArea> {
        let [chart_area, _footer] = split(area);
        let inner = Block::default().borders(Borders::ALL).inner(chart_area);
        let label_w = y_labels(spec.y_bounds())
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let left = inner.x + label_w + 1;
        let width = inner.width.checked_sub(label_w + 2)?;
        let height = inner.height.checked_sub(3)?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(PlotArea {
            rect: Rect::new(left, inner.y + 1, width, height),
            x: spec.x_bounds(),
            y: spec.y_bounds(),
        })
    }
}

fn split(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area)
}

fn y_labels([lo, hi]: [f64; 2]) -> Vec<String> {
    (0..Y_LABELS)
        .map(|k| {
            let v = lo + (hi - lo) * k as f64 / (Y_LABELS - 1) as f64;
            format!("{v:.2}%")
        })
        .collect()
}

/// Mapping between data coordinates and terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub rect: Rect,
    x: [f64; 2],
    y: [f64; 2],
}

impl PlotArea {
    pub fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let x_span = self.x[1] - self.x[0];
        let y_span = self.y[1] - self.y[0];
        if x_span <= 0.0 || y_span <= 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let fx = (x - self.x[0]) / x_span;
        let fy = (y - self.y[0]) / y_span;
        if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
            return None;
        }
        let col = self.rect.x + (fx * f64::from(self.rect.width - 1)).round() as u16;
        // Row 0 is the top of the screen.
        let row = self.rect.bottom() - 1 - (fy * f64::from(self.rect.height - 1)).round() as u16;
        Some((col, row))
    }

    /// Data x under a terminal column, clamped into the plot.
    pub fn col_to_x(&self, col: u16) -> f64 {
        let col = col.clamp(self.rect.x, self.rect.right() - 1);
        let frac = if self.rect.width > 1 {
            f64::from(col - self.rect.x) / f64::from(self.rect.width - 1)
        } else {
            0.0
        };
        self.x[0] + frac * (self.x[1] - self.x[0])
    }
}

impl<'a> Widget for ChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spec = self.spec;
        let theme = self.theme;
        let [chart_area, footer] = split(area);

        let color = theme.tone(spec.tone);
        let coords = spec.coords();
        let x_bounds = spec.x_bounds();
        let y_bounds = spec.y_bounds();

        let positive: Vec<(f64, f64)> = coords.iter().copied().filter(|&(_, v)| v >= 0.0).collect();
        let negative: Vec<(f64, f64)> = coords.iter().copied().filter(|&(_, v)| v < 0.0).collect();
        let zero = [(x_bounds[0], 0.0), (x_bounds[1], 0.0)];

        let mut datasets = Vec::new();
        if spec.zero_line {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme.muted))
                    .data(&zero),
            );
        }
        match spec.kind {
            ChartKind::Line { markers } => {
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::Braille)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(color))
                        .data(&coords),
                );
                if markers {
                    datasets.push(
                        Dataset::default()
                            .marker(symbols::Marker::Dot)
                            .graph_type(GraphType::Scatter)
                            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                            .data(&coords),
                    );
                }
            }
            ChartKind::Fill => {
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::Braille)
                        .graph_type(GraphType::Bar)
                        .style(Style::default().fg(color).add_modifier(Modifier::DIM))
                        .data(&coords),
                );
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::Braille)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                        .data(&coords),
                );
            }
            ChartKind::Bar => {
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::HalfBlock)
                        .graph_type(GraphType::Bar)
                        .style(Style::default().fg(theme.positive))
                        .data(&positive),
                );
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::HalfBlock)
                        .graph_type(GraphType::Bar)
                        .style(Style::default().fg(theme.negative))
                        .data(&negative),
                );
            }
        }

        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", spec.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("| {} ", spec.subtitle),
                Style::default().fg(theme.text_secondary),
            ),
        ]);

        let x_labels: Vec<Span> = spec.x_labels(X_LABELS).into_iter().map(Span::raw).collect();
        let y_labels: Vec<Span> = y_labels(y_bounds).into_iter().map(Span::raw).collect();

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(theme.background)),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(spec.x_label, Style::default().fg(theme.text_secondary)))
                    .style(Style::default().fg(theme.muted))
                    .bounds(x_bounds)
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(spec.y_label, Style::default().fg(theme.text_secondary)))
                    .style(Style::default().fg(theme.muted))
                    .bounds(y_bounds)
                    .labels(y_labels),
            );

        chart.render(chart_area, buf);

        let plot = Self::plot_area(spec, area);

        // Chart has no point annotations; write labels one row above the point.
        if let Some(plot) = plot {
            for a in &spec.annotations {
                if let Some((col, row)) = plot.to_cell(a.x, a.y) {
                    let row = if a.y < 0.0 { row + 1 } else { row.saturating_sub(1) };
                    let row = row.clamp(plot.rect.y, plot.rect.bottom() - 1);
                    let style = Style::default().fg(theme.tone(a.tone));
                    put_clamped(buf, plot.rect, col, row, &a.text, style);
                }
            }
        }

        let tooltip = match (plot, self.cursor) {
            (Some(plot), Some(col)) => spec.hover_at(plot.col_to_x(col)).map(|t| (plot, t)),
            _ => None,
        };

        if let Some((plot, tip)) = &tooltip {
            let style = Style::default()
                .fg(theme.background)
                .bg(theme.neutral)
                .add_modifier(Modifier::BOLD);
            if let Some((col, row)) = plot.to_cell(tip.x, tip.y) {
                for y in plot.rect.y..plot.rect.bottom() {
                    if let Some(cell) = buf.cell_mut((col, y)) {
                        if cell.symbol() == " " {
                            cell.set_symbol("│").set_style(Style::default().fg(theme.muted));
                        }
                    }
                }
                let text = format!(" {} {} ", tip.date, tip.value);
                let row = if row > plot.rect.y { row - 1 } else { row + 1 };
                put_clamped(buf, plot.rect, col + 1, row.min(plot.rect.bottom() - 1), &text, style);
            }
        }

        let hint = match &tooltip {
            Some((_, tip)) => format!(" 📊 {}  {}   ·   q/Esc fecha", tip.date, tip.value),
            None => " q/Esc/Enter fecha · mouse ou ←/→ mostra valores".to_string(),
        };
        Paragraph::new(Span::styled(hint, Style::default().fg(theme.text_secondary)))
            .render(footer, buf);
    }
}

/// Write `text` starting at `col`, shifted left so it stays inside `bounds`.
fn put_clamped(buf: &mut Buffer, bounds: Rect, col: u16, row: u16, text: &str, style: Style) {
    let width = text.chars().count() as u16;
    let max_start = bounds.right().saturating_sub(width).max(bounds.x);
    let start = col.saturating_sub(width / 2).clamp(bounds.x, max_start);
    let room = (bounds.right() - start) as usize;
    buf.set_stringn(start, row, text, room, style);
}
