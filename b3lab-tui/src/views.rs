//! Chart views - renderer-agnostic descriptions of the four analysis charts.
//!
//! Each builder derives its series from the session through the metrics
//! engine and returns a `ChartSpec` the chart panel knows how to draw. A
//! builder returns `None` when there is nothing to plot.

use b3lab_core::domain::Session;
use b3lab_core::hover::{date_x, nearest_index, nearest_point};
use b3lab_core::metrics::{self, SeriesPoint};
use b3lab_core::AppConfig;

use crate::navigation::View;

/// Semantic colour role, resolved by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Positive,
    Negative,
    Warning,
    Neutral,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line { markers: bool },
    /// Line with the area down to zero shaded.
    Fill,
    /// One bar per point, coloured by sign.
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// Points placed at their date's day number.
    Date,
    /// Point `i` placed at `x = i`.
    Index,
}

/// Text pinned to a data coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverFormat {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub decimals: usize,
}

impl HoverFormat {
    pub fn value(&self, v: f64) -> String {
        format!("{}{:.*}{}", self.prefix, self.decimals, v, self.suffix)
    }
}

/// What the cursor is over.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub x: f64,
    pub y: f64,
    pub date: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub subtitle: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
    pub axis: XAxis,
    pub points: Vec<SeriesPoint>,
    pub annotations: Vec<Annotation>,
    pub hover: HoverFormat,
    pub zero_line: bool,
    pub tone: Tone,
}

impl ChartSpec {
    /// X coordinate of the `i`-th point.
    pub fn x_of(&self, i: usize) -> f64 {
        match self.axis {
            XAxis::Date => date_x(self.points[i].date),
            XAxis::Index => i as f64,
        }
    }

    /// Points as `(x, y)` plot coordinates.
    pub fn coords(&self) -> Vec<(f64, f64)> {
        (0..self.points.len())
            .map(|i| (self.x_of(i), self.points[i].value))
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        if self.points.is_empty() {
            return [0.0, 1.0];
        }
        let (lo, hi) = (self.x_of(0), self.x_of(self.points.len() - 1));
        match self.axis {
            // Half a slot on each side so the end bars are not clipped.
            XAxis::Index => [lo - 0.5, hi + 0.5],
            XAxis::Date if lo == hi => [lo - 1.0, hi + 1.0],
            XAxis::Date => [lo, hi],
        }
    }

    /// Value range padded by 10%, always containing zero for charts that
    /// draw down to it.
    pub fn y_bounds(&self) -> [f64; 2] {
        let values = self.points.iter().map(|p| p.value).filter(|v| v.is_finite());
        let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !lo.is_finite() {
            return [0.0, 1.0];
        }
        if self.zero_line || matches!(self.kind, ChartKind::Fill | ChartKind::Bar) {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        let pad = ((hi - lo) * 0.1).max(0.1);
        [lo - pad, hi + pad]
    }

    /// Up to `count` evenly spaced `dd/mm` labels along the x axis.
    pub fn x_labels(&self, count: usize) -> Vec<String> {
        let n = self.points.len();
        if n == 0 || count == 0 {
            return Vec::new();
        }
        let count = count.min(n);
        if count == 1 {
            return vec![self.points[0].date.format("%d/%m").to_string()];
        }
        (0..count)
            .map(|k| {
                let i = k * (n - 1) / (count - 1);
                self.points[i].date.format("%d/%m").to_string()
            })
            .collect()
    }

    /// Tooltip for the point nearest to `cursor_x`.
    pub fn hover_at(&self, cursor_x: f64) -> Option<Tooltip> {
        let (x, date, value) = match self.axis {
            XAxis::Date => {
                let (date, value) = nearest_point(&self.points, cursor_x)?;
                (date_x(date), date, value)
            }
            XAxis::Index => {
                let (i, date, value) = nearest_index(&self.points, cursor_x)?;
                (i as f64, date, value)
            }
        };
        Some(Tooltip {
            x,
            y: value,
            date: date.format("%d/%m/%Y").to_string(),
            value: self.hover.value(value),
        })
    }
}

const PERCENT: HoverFormat = HoverFormat {
    prefix: "",
    suffix: "%",
    decimals: 2,
};

/// Chart for a view; `None` for the summary table or when there is no data.
pub fn build(view: View, session: &Session, config: &AppConfig) -> Option<ChartSpec> {
    match view {
        View::Summary => None,
        View::VolatilityWeek => volatility_week(session, config),
        View::VolatilityMonth => volatility_month(session, config),
        View::WeeklyReturn => weekly_return(session, config),
        View::MonthlyReturn => monthly_return(session),
    }
}

fn rolling_short_volatility(session: &Session, config: &AppConfig) -> Vec<SeriesPoint> {
    let daily = metrics::daily_returns(&session.series);
    metrics::rolling_volatility(&daily, config.volatility.weekly_window)
}

/// Last week of short-window rolling volatility, with a label on every point.
pub fn volatility_week(session: &Session, config: &AppConfig) -> Option<ChartSpec> {
    let vol = rolling_short_volatility(session, config);
    let points = metrics::tail(&vol, config.charts.week_tail).to_vec();
    if points.is_empty() {
        return None;
    }

    let annotations = points
        .iter()
        .map(|p| Annotation {
            x: date_x(p.date),
            y: p.value,
            text: format!("{:.1}%", p.value),
            tone: Tone::Neutral,
        })
        .collect();

    Some(ChartSpec {
        title: "Volatilidade - Última Semana".into(),
        subtitle: session.label(),
        x_label: "Data",
        y_label: "Volatilidade (%)",
        kind: ChartKind::Line { markers: true },
        axis: XAxis::Date,
        points,
        annotations,
        hover: PERCENT,
        zero_line: false,
        tone: Tone::Negative,
    })
}

/// Last month of short-window rolling volatility with its extremes marked.
pub fn volatility_month(session: &Session, config: &AppConfig) -> Option<ChartSpec> {
    let vol = rolling_short_volatility(session, config);
    let points = metrics::tail(&vol, config.charts.month_tail).to_vec();
    let max = metrics::max_point(&points)?;
    let min = metrics::min_point(&points)?;

    let annotations = vec![
        Annotation {
            x: date_x(max.date),
            y: max.value,
            text: format!("Máx: {:.2}%", max.value),
            tone: Tone::Negative,
        },
        Annotation {
            x: date_x(min.date),
            y: min.value,
            text: format!("Mín: {:.2}%", min.value),
            tone: Tone::Positive,
        },
    ];

    Some(ChartSpec {
        title: "Volatilidade - Último Mês".into(),
        subtitle: session.label(),
        x_label: "Data",
        y_label: "Volatilidade (%)",
        kind: ChartKind::Fill,
        axis: XAxis::Date,
        points,
        annotations,
        hover: PERCENT,
        zero_line: false,
        tone: Tone::Warning,
    })
}

/// Last four weeks of daily returns as signed bars.
pub fn weekly_return(session: &Session, config: &AppConfig) -> Option<ChartSpec> {
    let daily = metrics::daily_returns(&session.series);
    let points = metrics::tail(&daily, config.charts.daily_return_tail).to_vec();
    if points.is_empty() {
        return None;
    }

    let annotations = points
        .iter()
        .enumerate()
        .map(|(i, p)| Annotation {
            x: i as f64,
            y: p.value,
            text: format!("{:.1}%", p.value),
            tone: if p.value >= 0.0 { Tone::Positive } else { Tone::Negative },
        })
        .collect();

    Some(ChartSpec {
        title: "Retornos Diários - Últimas 4 Semanas".into(),
        subtitle: session.label(),
        x_label: "Dias",
        y_label: "Retorno (%)",
        kind: ChartKind::Bar,
        axis: XAxis::Index,
        points,
        annotations,
        hover: HoverFormat {
            prefix: "Retorno: ",
            ..PERCENT
        },
        zero_line: true,
        tone: Tone::Positive,
    })
}

/// Cumulative return over the whole fetch window.
///
/// Always marks the final value; the extremes only when they differ from it.
pub fn monthly_return(session: &Session) -> Option<ChartSpec> {
    let points = metrics::cumulative_return(&session.series);
    let last = *points.last()?;
    let max = metrics::max_point(&points)?;
    let min = metrics::min_point(&points)?;

    let mut annotations = vec![Annotation {
        x: date_x(last.date),
        y: last.value,
        text: format!("Final: {:.2}%", last.value),
        tone: Tone::Accent,
    }];
    if max.value != last.value {
        annotations.push(Annotation {
            x: date_x(max.date),
            y: max.value,
            text: format!("Máx: {:.2}%", max.value),
            tone: Tone::Positive,
        });
    }
    if min.value != last.value {
        annotations.push(Annotation {
            x: date_x(min.date),
            y: min.value,
            text: format!("Mín: {:.2}%", min.value),
            tone: Tone::Negative,
        });
    }

    Some(ChartSpec {
        title: "Retorno Acumulado - Período Completo".into(),
        subtitle: session.label(),
        x_label: "Data",
        y_label: "Retorno Acumulado (%)",
        kind: ChartKind::Fill,
        axis: XAxis::Date,
        points,
        annotations,
        hover: PERCENT,
        zero_line: true,
        tone: Tone::Accent,
    })
}
