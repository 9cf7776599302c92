use crate::app::{mode::AppMode, App};
use crate::ui::keymap::map_key;
use crate::ui::reader::view::{
    centered_offset, layout_units, render_blocks, render_command_deck, render_empty_hint,
    render_help, render_progress_bar, render_reader, render_units,
};
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::theme::colors;
use crossterm::event::{self, Event};
use log::debug;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Clear, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    // Dropped after the terminal, restoring the screen last
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Runs until the app enters `Quit`.
    ///
    /// Input is polled with a timeout bounded by the next playback deadline
    /// and the frame interval, so ticks fire on time without busy waiting.
    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        let render_tick = Duration::from_millis(1000 / 60);
        self.render_frame(app)?;
        let mut last_render = Instant::now();

        loop {
            if app.mode() == AppMode::Quit {
                debug!("leaving event loop");
                return Ok(());
            }

            let now = Instant::now();
            let mut poll_timeout = render_tick.saturating_sub(last_render.elapsed());
            if let Some(deadline) = app.next_deadline() {
                poll_timeout = poll_timeout.min(deadline.saturating_duration_since(now));
            }

            if event::poll(poll_timeout)? {
                if let Event::Key(key) = event::read()? {
                    let app_event = map_key(key, app.mode(), app.config().keyboard_shortcuts);
                    app.handle_event(app_event);
                }
            }

            app.tick(Instant::now());

            if last_render.elapsed() >= render_tick {
                self.render_frame(app)?;
                last_render = Instant::now();
            }
        }
    }

    pub fn render_frame(&mut self, app: &mut App) -> io::Result<()> {
        let render_state = app.get_render_state();
        let mut drawn_offset = render_state.highlight.scroll_offset();

        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(Style::default().bg(colors::background())),
                area,
            );

            // Reader pane, progress line, command deck
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(area);

            let reader_area = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(10),
                    Constraint::Percentage(80),
                    Constraint::Percentage(10),
                ])
                .split(rows[0])[1];

            if render_state.is_segmented() {
                let layout = layout_units(render_state.units, reader_area.width);
                let last_line = u16::try_from(layout.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
                drawn_offset = match render_state.highlight.scroll_target() {
                    Some(index) => {
                        let line = layout.unit_line.get(index).copied().unwrap_or(0);
                        centered_offset(line, reader_area.height)
                    }
                    None => render_state.highlight.scroll_offset().min(last_line),
                };
                let lines = render_units(&layout, render_state.highlight.highlighted());
                frame.render_widget(render_reader(lines, drawn_offset, false), reader_area);
            } else if render_state.document.is_empty() {
                frame.render_widget(render_empty_hint(), reader_area);
            } else {
                let lines = render_blocks(render_state.document);
                frame.render_widget(render_reader(lines, drawn_offset, true), reader_area);
            }

            let progress = render_progress_bar(render_state.progress_percent, &render_state.status());
            frame.render_widget(Paragraph::new(progress), rows[1]);
            frame.render_widget(render_command_deck(&render_state), rows[2]);

            if render_state.mode == AppMode::Help {
                let popup = centered_rect(70, 80, area);
                frame.render_widget(Clear, popup);
                frame.render_widget(render_help(), popup);
            }
        })?;

        app.highlight_mut().remember_offset(drawn_offset);
        Ok(())
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
