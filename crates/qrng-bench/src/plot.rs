//! Terminal bar chart of generation times.
//!
//! The chart is a ratatui widget, so the same drawing code backs the
//! interactive full-screen view and the plain-text fallback used when stdout
//! is not a terminal.

use std::io::{self, IsTerminal};

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::error::BenchResult;
use crate::runner::BenchmarkResults;

pub const TITLE: &str = "QRNG Simulation Time Comparison";
pub const Y_LABEL: &str = "Time to Generate (Seconds)";

/// Bar colors, reused in order when there are more bars than colors.
pub const PALETTE: [Color; 3] = [
    Color::Rgb(0x69, 0x29, 0xc4),
    Color::Rgb(0x00, 0x9d, 0x9a),
    Color::Rgb(0x11, 0x92, 0xe8),
];

/// Size of the plain-text rendering.
pub const TEXT_WIDTH: u16 = 80;
pub const TEXT_HEIGHT: u16 = 20;

const BAR_SYMBOL: &str = "█";
const GRID_SYMBOL: &str = "╌";
const EMPTY_MESSAGE: &str = "no successful generators";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    /// Duration in seconds.
    pub value: f64,
    pub color: Color,
}

impl ChartBar {
    /// Text drawn above the bar, e.g. `0.1234s`.
    pub fn annotation(&self) -> String {
        format!("{:.4}s", self.value)
    }
}

/// Bar chart with one bar per successful generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DurationChart {
    bars: Vec<ChartBar>,
}

impl DurationChart {
    pub fn from_results(results: &BenchmarkResults) -> Self {
        let bars = results
            .iter()
            .enumerate()
            .map(|(i, (name, secs))| ChartBar {
                label: name.to_string(),
                value: secs,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Self { bars }
    }

    pub fn bars(&self) -> &[ChartBar] {
        &self.bars
    }

    /// Draw into an off-screen buffer.
    pub fn render_to_buffer(&self, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        self.render(area, &mut buf);
        buf
    }

    /// Draw off-screen and return the rows as text, trailing blanks trimmed.
    pub fn render_to_text(&self, width: u16, height: u16) -> String {
        let buf = self.render_to_buffer(width, height);
        let mut rows = Vec::with_capacity(height as usize);
        for y in 0..height {
            let row: String = (0..width).map(|x| buf[(x, y)].symbol()).collect();
            rows.push(row.trim_end().to_string());
        }
        rows.join("\n")
    }
}

/// Rows a bar of `value` occupies when `max` fills `rows`.
fn bar_rows(value: f64, max: f64, rows: u16) -> u16 {
    if max <= 0.0 || value <= 0.0 || rows == 0 {
        return 0;
    }
    let scaled = (value / max * f64::from(rows)).round() as u16;
    scaled.clamp(1, rows)
}

/// X position that centers `len` cells on `center`, kept inside `[min, max_end)`.
fn centered_x(center: u16, len: u16, min: u16, max_end: u16) -> u16 {
    let start = center.saturating_sub(len / 2).max(min);
    if start + len > max_end {
        max_end.saturating_sub(len).max(min)
    } else {
        start
    }
}

impl Widget for &DurationChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(Line::from(TITLE).bold().centered());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height < 4 {
            return;
        }

        let dim = Style::default().add_modifier(Modifier::DIM);
        buf.set_stringn(inner.x, inner.y, Y_LABEL, inner.width as usize, dim);

        if self.bars.is_empty() {
            let x = centered_x(
                inner.x + inner.width / 2,
                EMPTY_MESSAGE.len() as u16,
                inner.x,
                inner.right(),
            );
            buf.set_stringn(
                x,
                inner.y + inner.height / 2,
                EMPTY_MESSAGE,
                inner.width as usize,
                dim,
            );
            return;
        }

        // Row layout: y-label, plot rows, bar labels.
        let plot_top = inner.y + 1;
        let label_row = inner.bottom() - 1;
        let baseline = label_row - 1;
        let plot_height = label_row - plot_top;
        // Top plot row is kept free for the tallest bar's annotation.
        let max_bar_rows = plot_height - 1;

        let max_value = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);

        let grid_style = Style::default().fg(Color::DarkGray);
        let grid_line = GRID_SYMBOL.repeat(inner.width as usize);
        for quarter in 1..=4u16 {
            let level = (f64::from(max_bar_rows) * f64::from(quarter) / 4.0).round() as u16;
            if level > 0 {
                buf.set_string(inner.x, baseline + 1 - level, &grid_line, grid_style);
            }
        }

        let count = self.bars.len() as u16;
        let slot = inner.width / count.max(1);
        if slot == 0 {
            return;
        }
        let bar_width = (slot * 3 / 5).max(1);

        for (i, bar) in self.bars.iter().enumerate() {
            let slot_x = inner.x + slot * i as u16;
            let slot_end = slot_x + slot;
            let bar_x = slot_x + (slot - bar_width) / 2;
            let center = bar_x + bar_width / 2;
            let height = bar_rows(bar.value, max_value, max_bar_rows);

            let fill = BAR_SYMBOL.repeat(bar_width as usize);
            for row in 0..height {
                buf.set_string(bar_x, baseline - row, &fill, Style::default().fg(bar.color));
            }

            let annotation = bar.annotation();
            let ann_len = (annotation.chars().count() as u16).min(slot);
            let ann_x = centered_x(center, ann_len, slot_x, slot_end);
            buf.set_stringn(
                ann_x,
                baseline - height,
                &annotation,
                slot as usize,
                Style::default(),
            );

            let label_len = (bar.label.chars().count() as u16).min(slot);
            let label_x = centered_x(center, label_len, slot_x, slot_end);
            buf.set_stringn(label_x, label_row, &bar.label, slot as usize, Style::default());
        }
    }
}

fn draw(frame: &mut Frame, chart: &DurationChart) {
    let [chart_area, hint_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    frame.render_widget(chart, chart_area);
    frame.render_widget(
        Paragraph::new("press q, Esc or Enter to close").dim().centered(),
        hint_area,
    );
}

fn is_close_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    chart: &DurationChart,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, chart))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_close_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

/// Display the chart, blocking until the user closes it.
///
/// Without a terminal on stdout the chart is printed once as text instead.
pub fn show(chart: &DurationChart) -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!("{}", chart.render_to_text(TEXT_WIDTH, TEXT_HEIGHT));
        return Ok(());
    }

    let guard = ScreenGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let result = event_loop(&mut terminal, chart);
    drop(terminal);

    let restored = guard.restore();
    result.and(restored)
}

/// Raw mode plus alternate screen, undone on drop if not restored explicitly.
struct ScreenGuard {
    active: bool,
}

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }

    fn restore(mut self) -> io::Result<()> {
        self.active = false;
        restore_all([
            &mut || disable_raw_mode(),
            &mut || execute!(io::stdout(), LeaveAlternateScreen, Show),
        ])
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        }
    }
}

/// Run every step, returning the first error.
fn restore_all<const N: usize>(
    steps: [&mut dyn FnMut() -> io::Result<()>; N],
) -> io::Result<()> {
    let mut first_err = None;
    for step in steps {
        if let Err(e) = step() {
            first_err.get_or_insert(e);
        }
    }
    first_err.map_or(Ok(()), Err)
}

/// Chart `results` and display it.
pub fn plot_results(results: &BenchmarkResults) -> BenchResult<()> {
    show(&DurationChart::from_results(results))?;
    Ok(())
}
