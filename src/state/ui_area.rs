//! UI area positioning for mouse event handling
//!
//! Layout math shared by the renderer and the mouse handler so a click maps
//! to the same card that was drawn there.
//!
//! ```text
//! Row 0-2:  Header (validity + binding strategy)
//! Row 3+:   Form block (question cards, submit button), inspector on the right
//! Bottom:   Status bar (1 row)
//! ```

/// Height of the header bar (with borders: top + content + bottom)
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows taken by one question card
pub const CARD_HEIGHT: u16 = 12;

/// Rows taken by the submit button (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Width of the submit button
pub const SUBMIT_BUTTON_WIDTH: u16 = 16;

/// First column inside the form block border
pub const FORM_CONTENT_X: u16 = 1;

/// Width of the inspection panel when shown
pub const INSPECTOR_WIDTH: u16 = 44;

/// UI area for calculating mouse Y offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiArea {
    /// Cards inside the form block (starts after header + border)
    FormContent,
}

impl UiArea {
    /// Get the starting Y row for this UI area (absolute screen position)
    #[inline]
    pub const fn start_y(self) -> u16 {
        match self {
            UiArea::FormContent => HEADER_HEIGHT + 1, // +1 for border
        }
    }

    /// Convert absolute mouse row to row relative to this UI area
    #[inline]
    pub fn relative_row(self, mouse_row: u16) -> u16 {
        mouse_row.saturating_sub(self.start_y())
    }

    /// Check if a mouse row is within this UI area (at or after start)
    #[inline]
    pub fn contains_row(self, mouse_row: u16) -> bool {
        mouse_row >= self.start_y()
    }
}

/// Inner height of the form block for a terminal of `terminal_height` rows
pub fn form_inner_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(HEADER_HEIGHT + STATUS_BAR_HEIGHT + 2)
}

/// Number of question cards that fit above the submit button
pub fn visible_cards(form_inner_height: u16) -> usize {
    (form_inner_height.saturating_sub(BUTTON_HEIGHT) / CARD_HEIGHT).max(1) as usize
}

/// What a click inside the form content hits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormHit {
    Question(usize),
    SubmitButton,
}

/// Map a position relative to `UiArea::FormContent` to what is drawn there.
///
/// Cards span the full width; the submit button only its own columns.
pub fn hit_test(
    relative_row: u16,
    relative_col: u16,
    scroll_offset: usize,
    visible: usize,
    question_count: usize,
) -> Option<FormHit> {
    let shown = visible.min(question_count.saturating_sub(scroll_offset));
    let cards_height = shown as u16 * CARD_HEIGHT;
    if relative_row < cards_height {
        return Some(FormHit::Question(
            scroll_offset + (relative_row / CARD_HEIGHT) as usize,
        ));
    }
    if relative_row < cards_height + BUTTON_HEIGHT && relative_col < SUBMIT_BUTTON_WIDTH {
        return Some(FormHit::SubmitButton);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_y_values() {
        assert_eq!(UiArea::FormContent.start_y(), 4);
    }

    #[test]
    fn test_relative_row_saturates() {
        assert_eq!(UiArea::FormContent.relative_row(0), 0);
        assert_eq!(UiArea::FormContent.relative_row(10), 6);
    }

    #[test]
    fn test_contains_row() {
        assert!(!UiArea::FormContent.contains_row(3));
        assert!(UiArea::FormContent.contains_row(4));
    }

    #[test]
    fn test_visible_cards() {
        // 24 row terminal: 24 - 3 - 1 - 2 = 18 inner rows, one card fits
        assert_eq!(visible_cards(form_inner_height(24)), 1);
        assert_eq!(visible_cards(form_inner_height(60)), 4);
        assert_eq!(visible_cards(0), 1);
    }

    #[test]
    fn test_hit_test_cards_and_button() {
        assert_eq!(hit_test(0, 0, 0, 2, 4), Some(FormHit::Question(0)));
        assert_eq!(hit_test(CARD_HEIGHT, 50, 0, 2, 4), Some(FormHit::Question(1)));
        assert_eq!(hit_test(CARD_HEIGHT * 2, 3, 0, 2, 4), Some(FormHit::SubmitButton));
        assert_eq!(hit_test(CARD_HEIGHT * 2 + BUTTON_HEIGHT, 3, 0, 2, 4), None);
    }

    #[test]
    fn test_hit_test_respects_scroll() {
        assert_eq!(hit_test(1, 0, 2, 2, 4), Some(FormHit::Question(2)));
        // Only the last card remains below the offset
        assert_eq!(hit_test(CARD_HEIGHT, 0, 3, 2, 4), Some(FormHit::SubmitButton));
    }

    #[test]
    fn test_hit_test_button_row_beside_button_is_empty() {
        let row = CARD_HEIGHT * 2 + 1;
        assert_eq!(
            hit_test(row, SUBMIT_BUTTON_WIDTH - 1, 0, 2, 4),
            Some(FormHit::SubmitButton)
        );
        assert_eq!(hit_test(row, SUBMIT_BUTTON_WIDTH, 0, 2, 4), None);
        assert_eq!(hit_test(row, 60, 0, 2, 4), None);
    }
}
