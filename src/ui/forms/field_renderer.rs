//! Question card rendering

use crate::state::{FieldBinding, QuestionDefinition};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows of answer text visible inside the input box
const INPUT_VISIBLE_LINES: u16 = 3;

/// Everything a question card consumes
pub struct QuestionCardProps<'a> {
    pub question: &'a QuestionDefinition,
    pub binding: FieldBinding<'a>,
    pub is_active: bool,
}

/// Draw one question card: title, description, chip, input, counter and
/// the alert line when the field has an error
pub fn draw_question_card(frame: &mut Frame, area: Rect, props: &QuestionCardProps) {
    let QuestionCardProps {
        question,
        binding,
        is_active,
    } = props;

    let border_style = if *is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let chip = Span::styled(
        format!(" {} ", question.chip_text),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .title(Line::from(vec![Span::raw(" "), chip, Span::raw(" ")]))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                       // Title
            Constraint::Length(2),                       // Description
            Constraint::Length(INPUT_VISIBLE_LINES + 2), // Input with borders
            Constraint::Length(1),                       // Counter
            Constraint::Length(1),                       // Alert
        ])
        .split(inner);

    let title = Paragraph::new(Span::styled(
        question.title,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, chunks[0]);

    let description = Paragraph::new(question.description)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[1]);

    draw_input(frame, chunks[2], question, binding, *is_active);

    let count = binding.value.chars().count();
    let counter_style = if count >= question.max_length {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let counter = Paragraph::new(Span::styled(
        format!("{count}/{}", question.max_length),
        counter_style,
    ))
    .alignment(Alignment::Right);
    frame.render_widget(counter, chunks[3]);

    if let Some(error) = binding.error {
        let alert = Paragraph::new(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.message.as_str(), Style::default().fg(Color::Red)),
        ]));
        frame.render_widget(alert, chunks[4]);
    }
}

/// Multi-line answer box; the border turns red while the field is invalid
fn draw_input(
    frame: &mut Frame,
    area: Rect,
    question: &QuestionDefinition,
    binding: &FieldBinding,
    is_active: bool,
) {
    let invalid = binding.error.is_some();
    let border_style = if invalid {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));

    let mut lines: Vec<Line> = if binding.value.is_empty() {
        vec![Line::from(Span::styled(
            question.placeholder,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        binding
            .value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect()
    };

    if is_active {
        if binding.value.is_empty() {
            lines[0].spans.insert(0, cursor);
        } else if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner_width = block.inner(area).width.max(1) as usize;
    let scroll = input_scroll(&lines, inner_width, INPUT_VISIBLE_LINES as usize);

    let input = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    frame.render_widget(input, area);
}

/// Rows to scroll so the end of the text, where the cursor sits, stays visible
fn input_scroll(lines: &[Line], width: usize, visible: usize) -> u16 {
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    rows.saturating_sub(visible) as u16
}
