//! Form coordinator: owns answer values, validity and submission

use super::binding::{FieldBinding, InputRef};
use super::field::{FieldError, FieldRules, FieldState, FieldStatus};
use crate::state::catalog::{QuestionDefinition, REQUIRED_MESSAGE};
use crate::submit::SubmitHandler;
use chrono::{DateTime, Local};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by coordinator operations.
///
/// Validation failures are not errors; they live on the fields.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("submit handler failed: {0}")]
    Handler(#[from] anyhow::Error),
}

/// Answer snapshot keyed by question id, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(String, String)>,
}

impl FormValues {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All fields passed and the handler received these values
    Submitted(FormValues),
    /// Ids of the fields that failed validation; the handler was not called
    Rejected(Vec<String>),
}

/// Read-only view of one field for the inspection panel
#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshot {
    pub id: String,
    pub status: FieldStatus,
    /// Value differs from the empty default
    pub is_dirty: bool,
    pub value: Option<String>,
    pub length: usize,
    pub max_length: Option<usize>,
    pub error: Option<FieldError>,
    pub change_count: u64,
}

/// Read-only view of the whole form for the inspection panel
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub is_valid: bool,
    pub submit_count: u32,
    pub last_submitted_at: Option<DateTime<Local>>,
    pub fields: Vec<FieldSnapshot>,
}

/// Owns every field of one form for the lifetime of that form.
///
/// The field set is fixed to the catalog it was built from.
#[derive(Debug)]
pub struct FormCoordinator {
    catalog: &'static [QuestionDefinition],
    fields: Vec<FieldState>,
    refs: HashMap<String, InputRef>,
    submit_count: u32,
    last_submitted_at: Option<DateTime<Local>>,
}

impl FormCoordinator {
    /// Create a coordinator with one field per catalog entry
    pub fn from_catalog(catalog: &'static [QuestionDefinition]) -> Self {
        let fields = catalog
            .iter()
            .map(|q| FieldState::new(q.id, FieldRules::from_question(q, REQUIRED_MESSAGE)))
            .collect();
        Self {
            catalog,
            fields,
            refs: HashMap::new(),
            submit_count: 0,
            last_submitted_at: None,
        }
    }

    pub fn catalog(&self) -> &'static [QuestionDefinition] {
        self.catalog
    }

    #[cfg(test)]
    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    #[cfg(test)]
    pub fn last_submitted_at(&self) -> Option<DateTime<Local>> {
        self.last_submitted_at
    }

    fn index_of(&self, id: &str) -> Result<usize, FormError> {
        self.fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }

    /// Declare a field's rules. Calling it again for the same id replaces the
    /// rules and keeps value and status.
    pub fn register_field(&mut self, id: &str, rules: FieldRules) -> Result<(), FormError> {
        let index = self.index_of(id)?;
        self.fields[index].rules = rules;
        Ok(())
    }

    /// Register an input element for imperative reads and writes
    pub fn register_ref(&mut self, id: &str, input: InputRef) -> Result<(), FormError> {
        let index = self.index_of(id)?;
        input.set(self.fields[index].value_or_empty());
        self.refs.insert(id.to_string(), input);
        Ok(())
    }

    pub fn unregister_refs(&mut self) {
        self.refs.clear();
    }

    #[cfg(test)]
    pub fn has_ref(&self, id: &str) -> bool {
        self.refs.contains_key(id)
    }

    /// Store a new value and revalidate that field only
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), FormError> {
        let index = self.index_of(id)?;
        let value = value.into();
        if let Some(input) = self.refs.get(id) {
            input.set(&value);
        }

        let field = &mut self.fields[index];
        field.value = Some(value);
        field.change_count += 1;
        self.validate_at(index);
        Ok(())
    }

    /// Read the registered input element and treat its text as a change event
    pub fn handle_ref_change(&mut self, id: &str) -> Result<(), FormError> {
        let text = self
            .refs
            .get(id)
            .map(InputRef::value)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        self.set_value(id, text)
    }

    /// Run the field's rules, storing or clearing its error
    // The app validates through set_value and submit; kept for callers that
    // need an explicit revalidation.
    #[allow(dead_code)]
    pub fn validate_field(&mut self, id: &str) -> Result<Option<FieldError>, FormError> {
        let index = self.index_of(id)?;
        Ok(self.validate_at(index))
    }

    fn validate_at(&mut self, index: usize) -> Option<FieldError> {
        let field = &mut self.fields[index];
        let result = field.rules.check(field.value_or_empty());
        match result {
            Ok(()) => {
                field.status = FieldStatus::Valid;
                field.error = None;
            }
            Err(ref error) => {
                field.status = FieldStatus::Invalid;
                field.error = Some(error.clone());
            }
        }
        tracing::debug!(field = %field.id, status = field.status.label(), "validated field");
        result.err()
    }

    /// Whether every field currently passes its rules. Does not surface errors.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldState::passes_rules)
    }

    /// Snapshot of all values with undefined mapped to ""
    pub fn values(&self) -> FormValues {
        FormValues {
            entries: self
                .fields
                .iter()
                .map(|f| (f.id.clone(), f.value_or_empty().to_string()))
                .collect(),
        }
    }

    /// Validate every field and hand the values to `handler` when all pass
    pub fn submit(&mut self, handler: &mut dyn SubmitHandler) -> Result<SubmitOutcome, FormError> {
        self.submit_count += 1;

        let mut invalid = Vec::new();
        for index in 0..self.fields.len() {
            if self.validate_at(index).is_some() {
                invalid.push(self.fields[index].id.clone());
            }
        }

        if !invalid.is_empty() {
            tracing::warn!(
                attempt = self.submit_count,
                invalid = ?invalid,
                "submit blocked by validation"
            );
            return Ok(SubmitOutcome::Rejected(invalid));
        }

        let values = self.values();
        handler.on_submit(&values)?;
        self.last_submitted_at = Some(Local::now());
        tracing::info!(attempt = self.submit_count, fields = values.len(), "form submitted");
        Ok(SubmitOutcome::Submitted(values))
    }

    /// Return every field to pristine and empty registered inputs
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        for input in self.refs.values() {
            input.set("");
        }
        tracing::info!("form reset");
    }

    /// Render-prop entry point: invokes `render` with the field's binding
    pub fn controller<'a, R>(
        &'a self,
        id: &str,
        render: impl FnOnce(FieldBinding<'a>) -> R,
    ) -> Result<R, FormError> {
        let field = self
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        Ok(render(FieldBinding {
            id: &field.id,
            value: Cow::Borrowed(field.value_or_empty()),
            error: field.error.as_ref(),
        }))
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            is_valid: self.is_valid(),
            submit_count: self.submit_count,
            last_submitted_at: self.last_submitted_at,
            fields: self
                .fields
                .iter()
                .map(|f| FieldSnapshot {
                    id: f.id.clone(),
                    status: f.status,
                    is_dirty: f.is_dirty(),
                    value: f.value.clone(),
                    length: f.char_count(),
                    max_length: f.rules.max_length,
                    error: f.error.clone(),
                    change_count: f.change_count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::QUESTIONS;
    use crate::state::forms::field::ValidationRule;
    use crate::submit::MockSubmitHandler;
    use pretty_assertions::assert_eq;

    fn coordinator() -> FormCoordinator {
        FormCoordinator::from_catalog(QUESTIONS)
    }

    fn fill_all(form: &mut FormCoordinator) {
        form.set_value("background", "joined a club").unwrap();
        form.set_value("problem", "short deadline").unwrap();
        form.set_value("behavior", "lean plan").unwrap();
        form.set_value("result", "shipped").unwrap();
    }

    mod values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_keys_match_catalog() {
            let form = coordinator();
            let ids: Vec<_> = form.values().ids().map(str::to_string).collect();
            let catalog: Vec<_> = QUESTIONS.iter().map(|q| q.id.to_string()).collect();
            assert_eq!(ids, catalog);
        }

        #[test]
        fn test_undefined_values_snapshot_as_empty() {
            let form = coordinator();
            assert!(form.values().iter().all(|(_, v)| v.is_empty()));
        }

        #[test]
        fn test_set_value_round_trips() {
            let mut form = coordinator();
            for q in QUESTIONS {
                form.set_value(q.id, format!("answer for {}", q.id)).unwrap();
            }
            for q in QUESTIONS {
                let value = form.controller(q.id, |b| b.value.into_owned()).unwrap();
                assert_eq!(value, format!("answer for {}", q.id));
            }
        }

        #[test]
        fn test_set_value_unknown_field() {
            let mut form = coordinator();
            let err = form.set_value("nope", "x").unwrap_err();
            assert!(matches!(err, FormError::UnknownField(id) if id == "nope"));
        }

        #[test]
        fn test_serializes_in_catalog_order() {
            let mut form = coordinator();
            fill_all(&mut form);
            let json = serde_json::to_string(&form.values()).unwrap();
            assert_eq!(
                json,
                r#"{"background":"joined a club","problem":"short deadline","behavior":"lean plan","result":"shipped"}"#
            );
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_fields_start_pristine() {
            let form = coordinator();
            assert!(form
                .fields()
                .iter()
                .all(|f| f.status == FieldStatus::Pristine && f.error.is_none()));
            assert!(!form.is_valid());
        }

        #[test]
        fn test_set_value_revalidates_field() {
            let mut form = coordinator();
            form.set_value("background", "x").unwrap();
            assert_eq!(form.field("background").unwrap().status, FieldStatus::Valid);

            form.set_value("background", "   ").unwrap();
            let field = form.field("background").unwrap();
            assert_eq!(field.status, FieldStatus::Invalid);
            assert_eq!(field.error.as_ref().unwrap().message, REQUIRED_MESSAGE);

            form.set_value("background", "again").unwrap();
            assert_eq!(form.field("background").unwrap().status, FieldStatus::Valid);
        }

        #[test]
        fn test_change_is_field_local() {
            let mut form = coordinator();
            form.set_value("problem", "").unwrap();
            let before = form.field("problem").unwrap().clone();

            form.set_value("background", "x").unwrap();
            form.set_value("background", "").unwrap();

            let after = form.field("problem").unwrap();
            assert_eq!(after.status, before.status);
            assert_eq!(after.error, before.error);
        }

        #[test]
        fn test_change_does_not_touch_pristine_neighbours() {
            let mut form = coordinator();
            form.set_value("background", "x").unwrap();
            assert_eq!(form.field("problem").unwrap().status, FieldStatus::Pristine);
            assert!(form.field("problem").unwrap().error.is_none());
        }

        #[test]
        fn test_validate_field_clears_error() {
            let mut form = coordinator();
            assert!(form.validate_field("result").unwrap().is_some());
            form.fields[3].value = Some("done".to_string());
            assert!(form.validate_field("result").unwrap().is_none());
            assert!(form.field("result").unwrap().error.is_none());
        }

        #[test]
        fn test_max_length_rule() {
            let mut form = coordinator();
            form.set_value("result", "x".repeat(101)).unwrap();
            let error = form.field("result").unwrap().error.clone().unwrap();
            assert_eq!(error.rule, ValidationRule::MaxLength);
        }

        #[test]
        fn test_is_valid_when_all_filled() {
            let mut form = coordinator();
            fill_all(&mut form);
            assert!(form.is_valid());
        }

        #[test]
        fn test_register_field_is_idempotent() {
            let mut form = coordinator();
            form.set_value("problem", "kept").unwrap();
            let rules = FieldRules::required("custom");
            form.register_field("problem", rules.clone()).unwrap();
            form.register_field("problem", rules.clone()).unwrap();

            assert_eq!(form.fields().len(), QUESTIONS.len());
            let field = form.field("problem").unwrap();
            assert_eq!(field.rules, rules);
            assert_eq!(field.value.as_deref(), Some("kept"));
        }

        #[test]
        fn test_register_unknown_field() {
            let mut form = coordinator();
            assert!(form.register_field("extra", FieldRules::default()).is_err());
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_empty_blocks_handler() {
            for q in QUESTIONS.iter().filter(|q| q.required) {
                let mut form = coordinator();
                fill_all(&mut form);
                form.set_value(q.id, "").unwrap();

                let mut handler = MockSubmitHandler::new();
                handler.expect_on_submit().never();

                let outcome = form.submit(&mut handler).unwrap();
                assert_eq!(outcome, SubmitOutcome::Rejected(vec![q.id.to_string()]));
                assert_eq!(
                    form.field(q.id).unwrap().error.as_ref().unwrap().message,
                    REQUIRED_MESSAGE
                );
            }
        }

        #[test]
        fn test_missing_result_scenario() {
            let mut form = coordinator();
            form.set_value("background", "x").unwrap();
            form.set_value("problem", "y").unwrap();
            form.set_value("behavior", "z").unwrap();
            form.set_value("result", "").unwrap();

            let mut handler = MockSubmitHandler::new();
            handler.expect_on_submit().never();

            let outcome = form.submit(&mut handler).unwrap();
            assert_eq!(outcome, SubmitOutcome::Rejected(vec!["result".to_string()]));
            assert!(form.field("result").unwrap().error.is_some());
            for id in ["background", "problem", "behavior"] {
                assert!(form.field(id).unwrap().error.is_none(), "{id} has an error");
            }
        }

        #[test]
        fn test_untouched_form_rejects_every_field() {
            let mut form = coordinator();
            let mut handler = MockSubmitHandler::new();
            handler.expect_on_submit().never();

            let outcome = form.submit(&mut handler).unwrap();
            let expected: Vec<_> = QUESTIONS.iter().map(|q| q.id.to_string()).collect();
            assert_eq!(outcome, SubmitOutcome::Rejected(expected));
            assert_eq!(form.submit_count(), 1);
        }

        #[test]
        fn test_all_filled_calls_handler_once() {
            let mut form = coordinator();
            fill_all(&mut form);

            let mut handler = MockSubmitHandler::new();
            handler
                .expect_on_submit()
                .withf(|values: &FormValues| {
                    values.len() == 4
                        && values.get("background") == Some("joined a club")
                        && values.get("problem") == Some("short deadline")
                        && values.get("behavior") == Some("lean plan")
                        && values.get("result") == Some("shipped")
                })
                .times(1)
                .returning(|_| Ok(()));

            let outcome = form.submit(&mut handler).unwrap();
            assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
            assert!(form.last_submitted_at().is_some());
        }

        #[test]
        fn test_handler_failure_is_reported() {
            let mut form = coordinator();
            fill_all(&mut form);

            let mut handler = MockSubmitHandler::new();
            handler
                .expect_on_submit()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("stdout closed")));

            let err = form.submit(&mut handler).unwrap_err();
            assert!(matches!(err, FormError::Handler(_)));
            assert!(form.last_submitted_at().is_none());
        }

        #[test]
        fn test_submit_count_counts_attempts() {
            let mut form = coordinator();
            let mut handler = MockSubmitHandler::new();
            handler.expect_on_submit().times(1).returning(|_| Ok(()));

            form.submit(&mut handler).unwrap();
            fill_all(&mut form);
            form.submit(&mut handler).unwrap();
            assert_eq!(form.submit_count(), 2);
        }
    }

    mod refs_and_reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_value_writes_registered_ref() {
            let mut form = coordinator();
            let input = InputRef::default();
            form.register_ref("problem", input.clone()).unwrap();
            form.set_value("problem", "typed").unwrap();
            assert_eq!(input.value(), "typed");
        }

        #[test]
        fn test_register_ref_seeds_element() {
            let mut form = coordinator();
            form.set_value("problem", "existing").unwrap();
            let input = InputRef::default();
            form.register_ref("problem", input.clone()).unwrap();
            assert_eq!(input.value(), "existing");
        }

        #[test]
        fn test_handle_ref_change_reads_element() {
            let mut form = coordinator();
            let input = InputRef::default();
            form.register_ref("behavior", input.clone()).unwrap();
            input.set("from element");
            form.handle_ref_change("behavior").unwrap();
            assert_eq!(
                form.field("behavior").unwrap().value.as_deref(),
                Some("from element")
            );
        }

        #[test]
        fn test_handle_ref_change_without_ref() {
            let mut form = coordinator();
            assert!(form.handle_ref_change("behavior").is_err());
        }

        #[test]
        fn test_reset_returns_to_pristine() {
            let mut form = coordinator();
            let input = InputRef::default();
            form.register_ref("background", input.clone()).unwrap();
            fill_all(&mut form);
            form.set_value("result", "").unwrap();

            form.reset();

            assert!(form
                .fields()
                .iter()
                .all(|f| f.status == FieldStatus::Pristine && f.value.is_none() && f.error.is_none()));
            assert_eq!(input.value(), "");
        }
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut form = coordinator();
        form.set_value("background", "abc").unwrap();
        let snapshot = form.snapshot();
        assert!(!snapshot.is_valid);
        assert_eq!(snapshot.fields.len(), 4);
        assert_eq!(snapshot.fields[0].length, 3);
        assert_eq!(snapshot.fields[0].change_count, 1);
        assert_eq!(snapshot.fields[1].status, FieldStatus::Pristine);

        assert!(snapshot.fields[0].is_dirty);
        assert!(!snapshot.fields[1].is_dirty);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["submit_count"], 0);
        assert_eq!(json["fields"][0]["status"], "valid");
        assert_eq!(json["fields"][0]["is_dirty"], true);
        assert_eq!(json["fields"][0]["error"], serde_json::Value::Null);
    }

    #[test]
    fn test_field_becomes_clean_when_emptied() {
        let mut form = coordinator();
        form.set_value("background", "abc").unwrap();
        form.set_value("background", "").unwrap();
        let field = form.field("background").unwrap();
        assert!(!field.is_dirty());
        assert_eq!(field.status, FieldStatus::Invalid);
    }
}
