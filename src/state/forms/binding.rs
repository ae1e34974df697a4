//! Input binding strategies connecting rendered fields to the coordinator
//!
//! Three interchangeable adapters share one contract: the renderer always
//! gets a defined value, and every accepted edit reaches the coordinator as
//! exactly one change event.
//! - `ControllerBinding`: render-prop style, the coordinator hands the field
//!   binding to a callback
//! - `HookBinding`: subscribes to the field state and defaults an undefined
//!   value to `""`
//! - `RefBinding`: registers an input element the coordinator reads and
//!   writes imperatively

use super::coordinator::{FormCoordinator, FormError};
use super::field::{FieldEdit, FieldError, FieldRules};
use crate::state::catalog::{QuestionDefinition, REQUIRED_MESSAGE};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// What the field renderer consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding<'a> {
    pub id: &'a str,
    pub value: Cow<'a, str>,
    pub error: Option<&'a FieldError>,
}

/// Shared text element registered with the coordinator by `RefBinding`
#[derive(Debug, Clone, Default)]
pub struct InputRef(Rc<RefCell<String>>);

impl InputRef {
    pub fn value(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn set(&self, text: &str) {
        let mut inner = self.0.borrow_mut();
        inner.clear();
        inner.push_str(text);
    }

    /// Whether both handles point at the same element
    #[cfg(test)]
    pub fn same_element(&self, other: &InputRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Selects which adapter wires fields to the coordinator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BindingStrategy {
    #[default]
    Controller,
    Hook,
    Ref,
}

impl BindingStrategy {
    pub fn next(&self) -> Self {
        match self {
            Self::Controller => Self::Hook,
            Self::Hook => Self::Ref,
            Self::Ref => Self::Controller,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Hook => "hook",
            Self::Ref => "ref",
        }
    }

    /// Build a fresh adapter for this strategy
    pub fn adapter(&self) -> Box<dyn InputBinding> {
        match self {
            Self::Controller => Box::new(ControllerBinding),
            Self::Hook => Box::new(HookBinding),
            Self::Ref => Box::new(RefBinding::default()),
        }
    }
}

/// Contract every binding strategy satisfies
pub trait InputBinding {
    fn strategy(&self) -> BindingStrategy;

    /// Wire one question into the coordinator
    fn attach(
        &mut self,
        coordinator: &mut FormCoordinator,
        question: &QuestionDefinition,
    ) -> Result<(), FormError>;

    /// Display value and error for the renderer
    fn binding<'a>(
        &'a self,
        coordinator: &'a FormCoordinator,
        id: &'a str,
    ) -> Result<FieldBinding<'a>, FormError>;

    /// Apply one user edit. Returns `false` when the edit changed nothing
    /// and no change event was emitted.
    fn on_change(
        &mut self,
        coordinator: &mut FormCoordinator,
        id: &str,
        edit: &FieldEdit,
    ) -> Result<bool, FormError>;

    /// Undo anything `attach` registered beyond field rules
    fn detach(&mut self, _coordinator: &mut FormCoordinator) {}
}

/// Attach every catalog question with the given adapter
pub fn attach_all(
    binding: &mut dyn InputBinding,
    coordinator: &mut FormCoordinator,
) -> Result<(), FormError> {
    for question in coordinator.catalog() {
        binding.attach(coordinator, question)?;
    }
    Ok(())
}

fn register_rules(
    coordinator: &mut FormCoordinator,
    question: &QuestionDefinition,
) -> Result<(), FormError> {
    coordinator.register_field(
        question.id,
        FieldRules::from_question(question, REQUIRED_MESSAGE),
    )
}

fn max_length(coordinator: &FormCoordinator, id: &str) -> Result<Option<usize>, FormError> {
    coordinator
        .field(id)
        .map(|f| f.rules.max_length)
        .ok_or_else(|| FormError::UnknownField(id.to_string()))
}

/// Render-prop strategy
#[derive(Debug, Default)]
pub struct ControllerBinding;

impl InputBinding for ControllerBinding {
    fn strategy(&self) -> BindingStrategy {
        BindingStrategy::Controller
    }

    fn attach(
        &mut self,
        coordinator: &mut FormCoordinator,
        question: &QuestionDefinition,
    ) -> Result<(), FormError> {
        register_rules(coordinator, question)
    }

    fn binding<'a>(
        &'a self,
        coordinator: &'a FormCoordinator,
        id: &'a str,
    ) -> Result<FieldBinding<'a>, FormError> {
        coordinator.controller(id, |field| field)
    }

    fn on_change(
        &mut self,
        coordinator: &mut FormCoordinator,
        id: &str,
        edit: &FieldEdit,
    ) -> Result<bool, FormError> {
        let max = max_length(coordinator, id)?;
        let next = coordinator.controller(id, |field| edit.apply(&field.value, max))?;
        match next {
            Some(value) => {
                coordinator.set_value(id, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Subscription-hook strategy
#[derive(Debug, Default)]
pub struct HookBinding;

impl InputBinding for HookBinding {
    fn strategy(&self) -> BindingStrategy {
        BindingStrategy::Hook
    }

    fn attach(
        &mut self,
        coordinator: &mut FormCoordinator,
        question: &QuestionDefinition,
    ) -> Result<(), FormError> {
        register_rules(coordinator, question)
    }

    fn binding<'a>(
        &'a self,
        coordinator: &'a FormCoordinator,
        id: &'a str,
    ) -> Result<FieldBinding<'a>, FormError> {
        let field = coordinator
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        // Undefined becomes "" so the input stays controlled
        let value = field.value.as_deref().unwrap_or_default();
        Ok(FieldBinding {
            id: &field.id,
            value: Cow::Borrowed(value),
            error: field.error.as_ref(),
        })
    }

    fn on_change(
        &mut self,
        coordinator: &mut FormCoordinator,
        id: &str,
        edit: &FieldEdit,
    ) -> Result<bool, FormError> {
        let field = coordinator
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        let current = field.value.as_deref().unwrap_or_default();
        match edit.apply(current, field.rules.max_length) {
            Some(value) => {
                coordinator.set_value(id, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Ref-registration strategy
#[derive(Debug, Default)]
pub struct RefBinding {
    inputs: HashMap<String, InputRef>,
}

impl RefBinding {
    pub fn input(&self, id: &str) -> Option<&InputRef> {
        self.inputs.get(id)
    }

    fn input_or_err(&self, id: &str) -> Result<&InputRef, FormError> {
        self.input(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }
}

impl InputBinding for RefBinding {
    fn strategy(&self) -> BindingStrategy {
        BindingStrategy::Ref
    }

    fn attach(
        &mut self,
        coordinator: &mut FormCoordinator,
        question: &QuestionDefinition,
    ) -> Result<(), FormError> {
        register_rules(coordinator, question)?;
        let input = self.inputs.entry(question.id.to_string()).or_default();
        coordinator.register_ref(question.id, input.clone())
    }

    fn binding<'a>(
        &'a self,
        coordinator: &'a FormCoordinator,
        id: &'a str,
    ) -> Result<FieldBinding<'a>, FormError> {
        let input = self.input_or_err(id)?;
        let field = coordinator
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        Ok(FieldBinding {
            id: &field.id,
            value: Cow::Owned(input.value()),
            error: field.error.as_ref(),
        })
    }

    fn on_change(
        &mut self,
        coordinator: &mut FormCoordinator,
        id: &str,
        edit: &FieldEdit,
    ) -> Result<bool, FormError> {
        let max = max_length(coordinator, id)?;
        let input = self.input_or_err(id)?;
        match edit.apply(&input.value(), max) {
            Some(value) => {
                input.set(&value);
                coordinator.handle_ref_change(id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn detach(&mut self, coordinator: &mut FormCoordinator) {
        coordinator.unregister_refs();
        self.inputs.clear();
    }
}
