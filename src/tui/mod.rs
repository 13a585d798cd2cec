//! Ratatui-based chart window.
//!
//! Shows the rating histogram full-screen and blocks until the user closes it
//! with `q`, `Esc`, or `Enter`.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::domain::RatingSeries;
use crate::error::AppError;
use crate::plot::{BIN_COUNT, histogram_bins};

mod plotters_chart;

use plotters_chart::HistogramChart;

/// Chart title for a rating column.
pub fn chart_title(column: &str) -> String {
    format!("Distribution of NPS Ratings in \"{column}\"")
}

/// Show the histogram window and wait for it to be dismissed.
pub fn show_histogram(series: &RatingSeries, column: &str) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let view = HistogramView {
        title: chart_title(column),
        counts: histogram_bins(series),
        n: series.len(),
    };
    view.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct HistogramView {
    title: String,
    counts: [usize; BIN_COUNT],
    n: usize,
}

impl HistogramView {
    fn event_loop<B: ratatui::backend::Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && is_close_key(key.code) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        self.draw_chart(frame, chunks[0]);
        self.draw_footer(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.title.as_str())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let widget = HistogramChart {
            counts: &self.counts,
            x_label: "Rating (0-10)",
            y_label: "Frequency",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(format!("n={} ", self.n), Style::default().fg(Color::Gray)),
            Span::styled("q/Esc/Enter: close", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn is_close_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn title_quotes_the_column() {
        assert_eq!(chart_title("NPS"), "Distribution of NPS Ratings in \"NPS\"");
    }

    #[test]
    fn close_keys() {
        assert!(is_close_key(KeyCode::Char('q')));
        assert!(is_close_key(KeyCode::Esc));
        assert!(is_close_key(KeyCode::Enter));
        assert!(!is_close_key(KeyCode::Char('x')));
    }

    #[test]
    fn footer_shows_count_and_keys() {
        let view = HistogramView {
            title: chart_title("score"),
            counts: [0; BIN_COUNT],
            n: 3,
        };
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.draw_footer(f, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line: String = (0..40u16).map(|x| buffer[(x, 0u16)].symbol().to_string()).collect();
        assert!(line.starts_with("n=3 q/Esc/Enter: close"));
    }
}
