//! Read-only inspection panel showing the live form state

use super::widgets::{key_hint, render_scrollable_list};
use crate::app::App;
use crate::platform::COPY_STATE_SHORTCUT;
use crate::state::{find_question, FieldSnapshot, FieldStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Rows used by the summary above the field list
const SUMMARY_HEIGHT: u16 = 5;

pub fn draw_inspector(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Inspector ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SUMMARY_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1), // Copy hint
        ])
        .split(inner);

    let snapshot = app.coordinator.snapshot();

    let label = Style::default().fg(Color::DarkGray);
    let valid = if snapshot.is_valid {
        Span::styled("true", Style::default().fg(Color::Green))
    } else {
        Span::styled("false", Style::default().fg(Color::Red))
    };
    let last_submit = snapshot
        .last_submitted_at
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let summary = Paragraph::new(vec![
        Line::from(vec![Span::styled("isValid      ", label), valid]),
        Line::from(vec![
            Span::styled("submitCount  ", label),
            Span::raw(snapshot.submit_count.to_string()),
        ]),
        Line::from(vec![
            Span::styled("binding      ", label),
            Span::raw(app.strategy().label()),
        ]),
        Line::from(vec![
            Span::styled("lastSubmit   ", label),
            Span::raw(last_submit),
        ]),
    ]);
    frame.render_widget(summary, chunks[0]);

    let items: Vec<ListItem> = snapshot.fields.iter().map(field_item).collect();
    let selected = app
        .state
        .focus
        .question()
        .unwrap_or_else(|| items.len().saturating_sub(1));
    let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));
    render_scrollable_list(frame, chunks[1], list, selected);

    frame.render_widget(
        Paragraph::new(Line::from(key_hint(COPY_STATE_SHORTCUT, "copy state").to_vec())),
        chunks[2],
    );
}

fn status_style(status: FieldStatus) -> Style {
    match status {
        FieldStatus::Pristine => Style::default().fg(Color::DarkGray),
        FieldStatus::Valid => Style::default().fg(Color::Green),
        FieldStatus::Invalid => Style::default().fg(Color::Red),
    }
}

fn field_item(field: &FieldSnapshot) -> ListItem<'static> {
    let length = match field.max_length {
        Some(max) => format!("{}/{max}", field.length),
        None => field.length.to_string(),
    };
    let chip = find_question(&field.id).map_or("", |q| q.chip_text);
    let mut spans = vec![
        Span::styled(
            field.id.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({chip})"), Style::default().fg(Color::Magenta)),
        Span::raw(" "),
        Span::styled(field.status.label(), status_style(field.status)),
        Span::styled(
            format!(" {length} edits:{}", field.change_count),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if field.is_dirty {
        spans.push(Span::styled(" *", Style::default().fg(Color::Yellow)));
    }
    let mut lines = vec![Line::from(spans)];
    if let Some(error) = &field.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error.message),
            Style::default().fg(Color::Red),
        )));
    }
    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Cli, FormConfig, Settings};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(44, 24)).unwrap();
        terminal
            .draw(|frame| draw_inspector(frame, frame.area(), app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(&Settings::resolve(&FormConfig::default(), &Cli::default())).unwrap()
    }

    #[test]
    fn test_shows_summary() {
        let screen = render(&app());
        assert!(screen.contains("isValid      false"));
        assert!(screen.contains("submitCount  0"));
        assert!(screen.contains("binding      controller"));
        assert!(screen.contains("lastSubmit   never"));
        assert!(screen.contains(COPY_STATE_SHORTCUT));
    }

    #[test]
    fn test_lists_fields_with_status() {
        let mut app = app();
        app.coordinator.set_value("problem", "late").unwrap();
        let screen = render(&app);
        assert!(screen.contains("background (Background) pristine 0/100"));
        assert!(screen.contains("problem (Problem) valid 4/100 edits:1 *"));
        assert!(!screen.contains("edits:0 *"));
    }

    #[test]
    fn test_shows_field_errors() {
        let mut app = app();
        app.submit();
        let screen = render(&app);
        assert!(screen.contains("submitCount  1"));
        assert!(screen.contains("This question needs an answer"));
    }
}
