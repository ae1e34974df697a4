//! Application state and core logic

use crate::config::Settings;
use crate::platform::COPY_MODIFIER;
use crate::state::{
    attach_all, form_inner_height, hit_test, visible_cards, AppState, BindingStrategy, FieldEdit,
    Focus, FormCoordinator, FormHit, FormSnapshot, InputBinding, SubmitOutcome, UiArea,
    FORM_CONTENT_X, INSPECTOR_WIDTH, QUESTIONS,
};
use crate::submit::{ConsoleSubmitHandler, SubmitHandler};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use serde::Serialize;

/// What the copy shortcut puts on the clipboard
#[derive(Serialize)]
struct Inspection {
    binding: BindingStrategy,
    #[serde(flatten)]
    form: FormSnapshot,
}

/// Main application struct
pub struct App {
    /// Focus, dialogs and display toggles
    pub state: AppState,
    /// The one form this session edits
    pub coordinator: FormCoordinator,
    /// Active input binding adapter
    binding: Box<dyn InputBinding>,
    /// Receives accepted answers
    pub handler: ConsoleSubmitHandler,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for layout calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create the form and wire every question with the configured binding
    #[allow(clippy::field_reassign_with_default)]
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut coordinator = FormCoordinator::from_catalog(QUESTIONS);
        let mut binding = settings.binding_strategy.adapter();
        attach_all(binding.as_mut(), &mut coordinator)?;

        let mut state = AppState::default();
        state.show_inspector = settings.show_inspector;
        state.reset_on_submit = settings.reset_on_submit;

        tracing::info!(
            binding = settings.binding_strategy.label(),
            questions = QUESTIONS.len(),
            "form ready"
        );

        Ok(Self {
            state,
            coordinator,
            binding,
            handler: ConsoleSubmitHandler::new(),
            quit: false,
            terminal_size: None,
        })
    }

    pub fn binding(&self) -> &dyn InputBinding {
        self.binding.as_ref()
    }

    pub fn strategy(&self) -> BindingStrategy {
        self.binding.strategy()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn question_count(&self) -> usize {
        self.coordinator.catalog().len()
    }

    /// Number of question cards the current terminal shows at once
    pub fn visible_cards(&self) -> usize {
        let height = self.terminal_size.map(|(h, _)| h).unwrap_or(24);
        visible_cards(form_inner_height(height))
    }

    fn focus_next(&mut self) {
        let count = self.question_count();
        self.state.next_focus(count);
        self.scroll_to_focus();
    }

    fn focus_prev(&mut self) {
        let count = self.question_count();
        self.state.prev_focus(count);
        self.scroll_to_focus();
    }

    fn scroll_to_focus(&mut self) {
        let visible = self.visible_cards();
        let count = self.question_count();
        self.state.ensure_focus_visible(visible, count);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Error dialog is modal
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.submitted.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.submitted = None;
            }
            return Ok(());
        }

        self.state.status_message = None;

        if key.code == KeyCode::Char('y') && key.modifiers.contains(COPY_MODIFIER) {
            if let Err(e) = self.copy_state() {
                self.state.push_error(format!("Failed to copy state: {e}"));
            }
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('r') => self.reset(),
                KeyCode::Char('b') => {
                    if let Err(e) = self.cycle_binding() {
                        self.state.push_error(format!("Failed to switch binding: {e}"));
                    }
                }
                KeyCode::Char('u') => self.edit_focused(FieldEdit::Clear),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::F(2) => self.toggle_inspector(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => match self.state.focus {
                Focus::SubmitButton => self.submit(),
                Focus::Question(_) => self.edit_focused(FieldEdit::Newline),
            },
            KeyCode::Backspace => self.edit_focused(FieldEdit::Backspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.edit_focused(FieldEdit::Insert(c))
            }
            _ => {}
        }

        Ok(())
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.current_error().is_some() || self.state.submitted.is_some() {
            return Ok(());
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !UiArea::FormContent.contains_row(mouse.row) || self.in_inspector(mouse.column)
                {
                    return Ok(());
                }
                let relative_row = UiArea::FormContent.relative_row(mouse.row);
                let relative_col = mouse.column.saturating_sub(FORM_CONTENT_X);
                let hit = hit_test(
                    relative_row,
                    relative_col,
                    self.state.scroll_offset,
                    self.visible_cards(),
                    self.question_count(),
                );
                match hit {
                    Some(FormHit::Question(index)) => self.state.focus = Focus::Question(index),
                    Some(FormHit::SubmitButton) => {
                        self.state.focus = Focus::SubmitButton;
                        self.submit();
                    }
                    None => {}
                }
            }
            MouseEventKind::ScrollDown => self.focus_next(),
            MouseEventKind::ScrollUp => self.focus_prev(),
            _ => {}
        }

        Ok(())
    }

    /// Bracketed paste goes into the focused card in one edit
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.current_error().is_some() || self.state.submitted.is_some() {
            return;
        }
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.edit_focused(FieldEdit::Paste(text));
    }

    fn in_inspector(&self, column: u16) -> bool {
        let width = self.terminal_size.map(|(_, w)| w).unwrap_or(80);
        self.state.show_inspector && column >= width.saturating_sub(INSPECTOR_WIDTH)
    }

    /// Route one edit through the active binding into the focused field
    pub fn edit_focused(&mut self, edit: FieldEdit) {
        let Some(index) = self.state.focus.question() else {
            return;
        };
        let Some(question) = self.coordinator.catalog().get(index) else {
            return;
        };
        match self
            .binding
            .on_change(&mut self.coordinator, question.id, &edit)
        {
            Ok(true) => {}
            Ok(false) => {
                if let Some(max) = rejected_by_limit(&edit, question.max_length) {
                    self.state
                        .set_status(format!("Answers are limited to {max} characters"));
                }
            }
            Err(e) => self.state.push_error(e.to_string()),
        }
    }

    pub fn submit(&mut self) {
        submit_form(&mut self.state, &mut self.coordinator, &mut self.handler);
        self.scroll_to_focus();
    }

    pub fn reset(&mut self) {
        self.coordinator.reset();
        self.state.focus = Focus::default();
        self.state.scroll_offset = 0;
        self.state.set_status("Form reset");
    }

    /// Swap in the next binding adapter; answers stay with the coordinator
    pub fn cycle_binding(&mut self) -> Result<()> {
        let next = self.strategy().next();
        self.binding.detach(&mut self.coordinator);
        let mut binding = next.adapter();
        attach_all(binding.as_mut(), &mut self.coordinator)?;
        self.binding = binding;
        tracing::info!(binding = next.label(), "binding strategy changed");
        self.state
            .set_status(format!("Binding: {}", next.label()));
        Ok(())
    }

    pub fn toggle_inspector(&mut self) {
        self.state.show_inspector = !self.state.show_inspector;
    }

    /// Inspection snapshot as pretty JSON
    pub fn inspection_json(&self) -> Result<String> {
        let inspection = Inspection {
            binding: self.strategy(),
            form: self.coordinator.snapshot(),
        };
        Ok(serde_json::to_string_pretty(&inspection)?)
    }

    fn copy_state(&mut self) -> Result<()> {
        let json = self.inspection_json()?;
        self.copy_to_clipboard(&json)?;
        self.state.set_status("Form state copied");
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// The limit an edit ran into, when a no-op edit was caused by one
fn rejected_by_limit(edit: &FieldEdit, max_length: usize) -> Option<usize> {
    match edit {
        FieldEdit::Insert(_) | FieldEdit::Newline => Some(max_length),
        FieldEdit::Paste(text) if !text.is_empty() => Some(max_length),
        _ => None,
    }
}

/// Run one submit attempt and reflect the outcome in the app state
fn submit_form(
    state: &mut AppState,
    coordinator: &mut FormCoordinator,
    handler: &mut dyn SubmitHandler,
) {
    match coordinator.submit(handler) {
        Ok(SubmitOutcome::Submitted(values)) => {
            if state.reset_on_submit {
                coordinator.reset();
                state.focus = Focus::default();
            }
            state.set_status("Answers submitted");
            state.submitted = Some(values);
        }
        Ok(SubmitOutcome::Rejected(invalid)) => {
            let first = invalid.first().and_then(|id| {
                coordinator
                    .catalog()
                    .iter()
                    .position(|q| q.id == id.as_str())
            });
            if let Some(index) = first {
                state.focus = Focus::Question(index);
            }
            state.set_status(format!("{} question(s) need an answer", invalid.len()));
        }
        Err(e) => state.push_error(e.to_string()),
    }
}
