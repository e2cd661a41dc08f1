//! Chart renderer: the `ChartSurface` seam and its terminal implementation.
//!
//! A chart is modal. The menu loop calls `open`, then polls `is_open` until
//! the user closes the chart. `TerminalSurface` draws the chart full screen
//! in the alternate screen with raw mode and mouse capture on, and puts the
//! console back exactly as it was when the chart closes.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use b3lab_core::config::ChartConfig;

use crate::panels::ChartPanel;
use crate::theme::Theme;
use crate::views::ChartSpec;

/// Identifies one opened chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHandle(pub u64);

pub trait ChartSurface {
    /// Show `spec`. Returns once the chart is on screen.
    fn open(&mut self, spec: &ChartSpec) -> io::Result<ChartHandle>;
    /// Process pending input and report whether the chart is still shown.
    fn is_open(&mut self, handle: &ChartHandle) -> io::Result<bool>;
}

impl<S: ChartSurface + ?Sized> ChartSurface for &mut S {
    fn open(&mut self, spec: &ChartSpec) -> io::Result<ChartHandle> {
        (**self).open(spec)
    }

    fn is_open(&mut self, handle: &ChartHandle) -> io::Result<bool> {
        (**self).is_open(handle)
    }
}

/// Set while a chart owns the terminal, so interrupt and panic paths know
/// whether raw mode must be undone.
static CHART_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Leave raw mode and the alternate screen if a chart is showing.
pub fn restore_terminal() {
    if CHART_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

/// Ctrl-C path: restore the console and exit cleanly.
pub fn interrupt_exit() -> ! {
    restore_terminal();
    println!("\nAplicação interrompida pelo usuário.");
    std::process::exit(0);
}

/// Rendering state shared by every chart.
pub struct RenderContext {
    pub theme: Theme,
    pub poll_interval: Duration,
}

impl RenderContext {
    /// Install a panic hook that restores the terminal before printing the
    /// panic.
    pub fn new(config: &ChartConfig) -> Self {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            default_hook(info);
        }));

        Self {
            theme: Theme::default(),
            poll_interval: config.poll_interval(),
        }
    }

    pub fn teardown(&self) {
        restore_terminal();
    }
}

/// The ratatui/crossterm chart surface.
pub struct TerminalSurface<'a> {
    ctx: &'a RenderContext,
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    spec: Option<ChartSpec>,
    cursor: Option<u16>,
    next_id: u64,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(ctx: &'a RenderContext) -> Self {
        Self {
            ctx,
            terminal: None,
            spec: None,
            cursor: None,
            next_id: 0,
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let (Some(terminal), Some(spec)) = (self.terminal.as_mut(), self.spec.as_ref()) else {
            return Ok(());
        };
        let theme = &self.ctx.theme;
        let cursor = self.cursor;
        terminal.draw(|f| {
            f.render_widget(ChartPanel::new(spec, theme).cursor(cursor), f.area());
        })?;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.spec = None;
        self.cursor = None;
        if let Some(mut terminal) = self.terminal.take() {
            CHART_ACTIVE.store(false, Ordering::SeqCst);
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    /// Move the cursor by `delta` columns, starting from the middle.
    fn nudge(&mut self, delta: i32) -> io::Result<()> {
        let width = self.terminal.as_ref().map(|t| t.size()).transpose()?.map_or(0, |s| s.width);
        let current = self.cursor.map_or(i32::from(width / 2), i32::from);
        let next = (current + delta).clamp(0, i32::from(width.saturating_sub(1)));
        self.cursor = u16::try_from(next).ok();
        Ok(())
    }
}

impl ChartSurface for TerminalSurface<'_> {
    fn open(&mut self, spec: &ChartSpec) -> io::Result<ChartHandle> {
        self.close()?;

        enable_raw_mode()?;
        CHART_ACTIVE.store(true, Ordering::SeqCst);
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.terminal = Some(terminal);
        self.spec = Some(spec.clone());
        self.next_id += 1;
        tracing::debug!(title = %spec.title, points = spec.points.len(), "chart opened");

        self.draw()?;
        Ok(ChartHandle(self.next_id))
    }

    fn is_open(&mut self, handle: &ChartHandle) -> io::Result<bool> {
        if self.terminal.is_none() || handle.0 != self.next_id {
            return Ok(false);
        }

        let mut redraw = false;
        if event::poll(self.ctx.poll_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        interrupt_exit()
                    }
                    KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                        self.close()?;
                        return Ok(false);
                    }
                    KeyCode::Left => {
                        self.nudge(-1)?;
                        redraw = true;
                    }
                    KeyCode::Right => {
                        self.nudge(1)?;
                        redraw = true;
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                        self.cursor = Some(mouse.column);
                        redraw = true;
                    }
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }

        if redraw {
            self.draw()?;
        }
        Ok(true)
    }
}

impl Drop for TerminalSurface<'_> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
