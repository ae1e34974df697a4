//! Layout components (header, status bar)

use super::widgets::key_hint;
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{HEADER_HEIGHT, INSPECTOR_WIDTH, STATUS_BAR_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Screen regions for one frame
pub struct ScreenLayout {
    pub header: Rect,
    pub form: Rect,
    pub inspector: Option<Rect>,
    pub status: Rect,
}

/// Split the screen into header, form, optional inspector and status bar
pub fn create_layout(area: Rect, show_inspector: bool) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let (form, inspector) = if show_inspector {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(INSPECTOR_WIDTH)])
            .split(rows[1]);
        (columns[0], Some(columns[1]))
    } else {
        (rows[1], None)
    };

    ScreenLayout {
        header: rows[0],
        form,
        inspector,
        status: rows[2],
    }
}

/// Title, validity badge, binding strategy and submit count
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let validity = if app.coordinator.is_valid() {
        Span::styled("✅ Valid", Style::default().fg(Color::Green))
    } else {
        Span::styled("❌ Not Valid", Style::default().fg(Color::Red))
    };

    let line = Line::from(vec![
        Span::styled(
            " STAR reflection ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        validity,
        Span::styled(
            format!(
                "   binding: {}   submits: {}",
                app.strategy().label(),
                app.coordinator.submit_count()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Key hints on the left, latest status message on the right
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(key_hint("Tab", "next"));
    spans.extend(key_hint(SUBMIT_SHORTCUT, "submit"));
    spans.extend(key_hint("^R", "reset"));
    spans.extend(key_hint("^B", "binding"));
    spans.extend(key_hint("F2", "inspector"));
    spans.extend(key_hint("Esc", "quit"));

    let bar_style = Style::default().bg(Color::Black);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);

    if let Some(message) = &app.state.status_message {
        let status = Paragraph::new(Span::styled(
            format!("{message} "),
            Style::default().fg(Color::Green),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(status, area);
    }
}
