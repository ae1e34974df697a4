//! Confirmation shown after answers were handed to the submit handler

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use crate::state::FormValues;
use ratatui::{style::Color, Frame};

/// Render the submitted answers, one `id: answer` paragraph each
pub fn render_submitted_dialog(frame: &mut Frame, answers: &FormValues) {
    let message = answers
        .iter()
        .map(|(id, answer)| format!("{id}: {answer}"))
        .collect::<Vec<_>>()
        .join("\n");

    render_dialog(
        frame,
        DialogConfig {
            title: "Answers submitted",
            accent: Color::Green,
            message: &message,
            hint: Some(dismiss_hint("continue")),
            max_width: 72,
        },
    );
}
