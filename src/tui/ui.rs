//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Frame,
};

use crate::features::timer::{format_minutes, Mode, TimerView};
use crate::tui::app::App;

const HELP: &str = " space start/pause  r reset  1/2/3 mode  q quit ";

const fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Work => Color::Red,
        Mode::ShortBreak => Color::Green,
        Mode::LongBreak => Color::Blue,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode tabs
            Constraint::Min(5),    // Countdown and gauge
            Constraint::Length(3), // Counters and task
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, &view, chunks[0]);
    render_timer(frame, &view, chunks[1]);
    render_details(frame, app, &view, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

/// Render the mode tabs with the current mode highlighted.
fn render_tabs(frame: &mut Frame<'_>, view: &TimerView, area: Rect) {
    let selected = Mode::ALL.iter().position(|m| *m == view.mode).unwrap_or(0);
    let tabs = Tabs::new(Mode::ALL.iter().map(|m| format!("{} {}", selected_marker(*m, view.mode), m.label())))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(mode_color(view.mode))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .block(Block::default().borders(Borders::ALL).title(" tomato "));

    frame.render_widget(tabs, area);
}

fn selected_marker(mode: Mode, current: Mode) -> &'static str {
    if mode == current {
        "●"
    } else {
        "○"
    }
}

/// Render the countdown and progress gauge.
fn render_timer(frame: &mut Frame<'_>, view: &TimerView, area: Rect) {
    let color = mode_color(view.mode);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let state = if view.is_running { "running" } else { "paused" };
    let countdown = Paragraph::new(vec![
        Line::from(Span::styled(
            view.display.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(state, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(countdown, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(view.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", view.progress * 100.0));
    frame.render_widget(gauge, rows[1]);
}

/// Render today's counters and the active task.
fn render_details(frame: &mut Frame<'_>, app: &App, view: &TimerView, area: Rect) {
    let mut spans = vec![
        Span::styled("Sessions ", Style::default().fg(Color::DarkGray)),
        Span::raw(view.sessions.to_string()),
        Span::styled("  Focus ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_minutes(view.total_focus_minutes)),
    ];

    if let Some(task) = app.active_task() {
        spans.push(Span::styled("  Task ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            task.text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    let details = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(details, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = app.status.as_deref().map_or_else(|| HELP.to_string(), |s| format!(" {s} |{HELP}"));
    let status = Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, ManualTicker};
    use crate::features::alerts::Silent;
    use crate::features::tasks::TaskList;
    use crate::features::timer::{Engine, Peripherals};
    use crate::storage::MemoryStore;
    use chrono::{Local, TimeZone};
    use ratatui::{backend::TestBackend, Terminal};

    fn app(store: &MemoryStore) -> App {
        App::new(Engine::new(
            Box::new(store.clone()),
            Peripherals {
                clock: Box::new(ManualClock::new(
                    Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
                )),
                ticker: Box::new(ManualTicker::new()),
                notifier: Box::new(Silent),
                sound: Box::new(Silent),
            },
        ))
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_idle_timer() {
        let screen = draw(&app(&MemoryStore::new()));

        assert!(screen.contains("25:00"));
        assert!(screen.contains("Short Break"));
        assert!(screen.contains("Sessions"));
        assert!(screen.contains("space start/pause"));
    }

    #[test]
    fn test_render_active_task() {
        let mut store = MemoryStore::new();
        let mut tasks = TaskList::default();
        tasks.add("write report").unwrap();
        tasks.set_active(1).unwrap();
        tasks.save(&mut store).unwrap();

        let screen = draw(&app(&store));
        assert!(screen.contains("write report"));
    }
}
