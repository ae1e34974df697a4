//! Application state definitions

use super::forms::FormValues;
use std::collections::VecDeque;

/// What currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Question card at this catalog index
    Question(usize),
    SubmitButton,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Question(0)
    }
}

impl Focus {
    /// Position in the focus ring, the submit button comes last
    pub fn ring_index(&self, question_count: usize) -> usize {
        match self {
            Focus::Question(i) => (*i).min(question_count),
            Focus::SubmitButton => question_count,
        }
    }

    pub fn from_ring_index(index: usize, question_count: usize) -> Self {
        if index < question_count {
            Focus::Question(index)
        } else {
            Focus::SubmitButton
        }
    }

    pub fn question(&self) -> Option<usize> {
        match self {
            Focus::Question(i) => Some(*i),
            Focus::SubmitButton => None,
        }
    }
}

/// Main application state (everything except the form itself)
#[derive(Debug, Default)]
pub struct AppState {
    pub focus: Focus,
    /// Index of the first question card drawn
    pub scroll_offset: usize,
    pub show_inspector: bool,
    pub reset_on_submit: bool,
    pub status_message: Option<String>,
    /// Answers from the last accepted submit, shown until dismissed
    pub submitted: Option<FormValues>,
    errors: VecDeque<String>,
}

impl AppState {
    /// Move focus forward, wrapping from the submit button to the first card
    pub fn next_focus(&mut self, question_count: usize) {
        let ring = question_count + 1;
        let next = (self.focus.ring_index(question_count) + 1) % ring;
        self.focus = Focus::from_ring_index(next, question_count);
    }

    /// Move focus backward, wrapping from the first card to the submit button
    pub fn prev_focus(&mut self, question_count: usize) {
        let current = self.focus.ring_index(question_count);
        let prev = if current == 0 {
            question_count
        } else {
            current - 1
        };
        self.focus = Focus::from_ring_index(prev, question_count);
    }

    /// Adjust the scroll offset so the focused card is drawn
    pub fn ensure_focus_visible(&mut self, visible_cards: usize, question_count: usize) {
        let visible = visible_cards.max(1);
        let max_offset = question_count.saturating_sub(visible);
        let target = match self.focus {
            Focus::Question(i) => i,
            Focus::SubmitButton => question_count.saturating_sub(1),
        };
        if target < self.scroll_offset {
            self.scroll_offset = target;
        } else if target >= self.scroll_offset + visible {
            self.scroll_offset = target + 1 - visible;
        }
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "error queued");
        self.errors.push_back(message);
    }

    /// Error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
