//! Form field value objects and validation rules

use crate::state::catalog::QuestionDefinition;
use serde::Serialize;

/// Validation verdict of a single field: `Pristine -> {Valid, Invalid}`.
///
/// Every change is validated immediately, so whether the value was edited
/// lives in `FieldState::is_dirty` rather than in a status of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    #[default]
    Pristine,
    Valid,
    Invalid,
}

impl FieldStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pristine => "pristine",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

/// Which rule produced a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    Required,
    MaxLength,
}

/// Validation failure attached to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub rule: ValidationRule,
    pub message: String,
}

/// Rules a field is registered with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    /// Error message when the value is empty or whitespace-only
    pub required: Option<String>,
    /// Maximum number of characters
    pub max_length: Option<usize>,
}

impl FieldRules {
    /// Required field with the given error message
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: Some(message.into()),
            max_length: None,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Derive rules from a catalog entry
    pub fn from_question(question: &QuestionDefinition, required_message: &str) -> Self {
        let rules = if question.required {
            Self::required(required_message)
        } else {
            Self::default()
        };
        rules.with_max_length(question.max_length)
    }

    /// Check a value against the rules without touching any state
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        if let Some(message) = &self.required {
            if value.trim().is_empty() {
                return Err(FieldError {
                    rule: ValidationRule::Required,
                    message: message.clone(),
                });
            }
        }
        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Err(FieldError {
                    rule: ValidationRule::MaxLength,
                    message: format!("Keep it to {max} characters or fewer"),
                });
            }
        }
        Ok(())
    }
}

/// A single user edit delivered by a binding adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Newline,
    Backspace,
    Clear,
    Paste(String),
}

impl FieldEdit {
    /// Apply the edit to `current`.
    ///
    /// Returns `None` when nothing changes, including inserts rejected
    /// because the text already holds `max_length` characters. Pastes are
    /// truncated to the remaining room.
    pub fn apply(&self, current: &str, max_length: Option<usize>) -> Option<String> {
        let room = max_length
            .map(|max| max.saturating_sub(current.chars().count()))
            .unwrap_or(usize::MAX);

        match self {
            FieldEdit::Insert(c) => insert_chars(current, std::iter::once(*c), room),
            FieldEdit::Newline => insert_chars(current, std::iter::once('\n'), room),
            FieldEdit::Paste(text) => insert_chars(current, text.chars(), room),
            FieldEdit::Backspace => {
                let mut next = current.to_string();
                next.pop()?;
                Some(next)
            }
            FieldEdit::Clear => (!current.is_empty()).then(String::new),
        }
    }
}

fn insert_chars(current: &str, chars: impl Iterator<Item = char>, room: usize) -> Option<String> {
    let mut next = current.to_string();
    let before = next.len();
    next.extend(chars.take(room));
    (next.len() != before).then_some(next)
}

/// State of one registered field, owned by the coordinator
#[derive(Debug, Clone)]
pub struct FieldState {
    pub id: String,
    pub rules: FieldRules,
    /// `None` until the field receives its first value
    pub value: Option<String>,
    pub status: FieldStatus,
    pub error: Option<FieldError>,
    /// Number of change events received
    pub change_count: u64,
}

impl FieldState {
    pub fn new(id: &str, rules: FieldRules) -> Self {
        Self {
            id: id.to_string(),
            rules,
            value: None,
            status: FieldStatus::Pristine,
            error: None,
            change_count: 0,
        }
    }

    /// Current value with undefined mapped to the empty string
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Whether the current value passes the rules, without surfacing errors
    pub fn passes_rules(&self) -> bool {
        self.rules.check(self.value_or_empty()).is_ok()
    }

    /// Whether the value differs from the empty default
    pub fn is_dirty(&self) -> bool {
        !self.value_or_empty().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.value_or_empty().chars().count()
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.status = FieldStatus::Pristine;
        self.error = None;
    }
}
