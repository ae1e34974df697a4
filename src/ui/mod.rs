//! UI module for rendering the TUI

mod components;
mod forms;
mod inspector;
mod layout;
mod widgets;

use crate::app::App;
use components::{render_error_dialog, render_submitted_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = layout::create_layout(frame.area(), app.state.show_inspector);

    layout::draw_header(frame, screen.header, app);
    forms::draw_question_form(frame, screen.form, app);
    if let Some(area) = screen.inspector {
        inspector::draw_inspector(frame, area, app);
    }
    layout::draw_status_bar(frame, screen.status, app);

    // Overlays, errors take precedence
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    } else if let Some(answers) = &app.state.submitted {
        render_submitted_dialog(frame, answers);
    }
}
