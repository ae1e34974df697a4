//! Question form rendering (cards and submit button)

use super::field_renderer::{draw_question_card, QuestionCardProps};
use crate::app::App;
use crate::state::{visible_cards, Focus, BUTTON_HEIGHT, CARD_HEIGHT, SUBMIT_BUTTON_WIDTH};
use crate::ui::components::render_button;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the question cards that fit, followed by the submit button
pub fn draw_question_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Reflection ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let catalog = app.coordinator.catalog();
    let visible = visible_cards(inner.height);
    let first = app.state.scroll_offset.min(catalog.len().saturating_sub(1));
    let last = (first + visible).min(catalog.len());

    let mut y = inner.y;
    for (index, question) in catalog.iter().enumerate().take(last).skip(first) {
        let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let card_area = Rect::new(inner.x, y, inner.width, height);

        match app.binding().binding(&app.coordinator, question.id) {
            Ok(binding) => {
                let props = QuestionCardProps {
                    question,
                    binding,
                    is_active: app.state.focus == Focus::Question(index),
                };
                draw_question_card(frame, card_area, &props);
            }
            Err(e) => {
                let message = Paragraph::new(e.to_string()).style(Style::default().fg(Color::Red));
                frame.render_widget(message, card_area);
            }
        }
        y += height;
    }

    let button_height = BUTTON_HEIGHT.min(inner.bottom().saturating_sub(y));
    if button_height > 0 {
        let button_area = Rect::new(
            inner.x,
            y,
            SUBMIT_BUTTON_WIDTH.min(inner.width),
            button_height,
        );
        render_button(
            frame,
            button_area,
            "Submit",
            app.state.focus == Focus::SubmitButton,
            app.coordinator.is_valid(),
        );

        if last < catalog.len() && button_height == BUTTON_HEIGHT {
            let more = Paragraph::new(format!(" ↓ {} more", catalog.len() - last))
                .style(Style::default().fg(Color::DarkGray));
            let more_area = Rect::new(
                button_area.right() + 1,
                y + 1,
                inner.width.saturating_sub(button_area.width + 1),
                1,
            );
            frame.render_widget(more, more_area);
        }
    }
}
