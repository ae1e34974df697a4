//! Form domain layer
//!
//! The coordinator owns the answers; binding adapters connect rendered
//! fields to it.

mod binding;
mod coordinator;
mod field;

pub use binding::{attach_all, BindingStrategy, FieldBinding, InputBinding};
pub use coordinator::{FieldSnapshot, FormCoordinator, FormSnapshot, FormValues, SubmitOutcome};
pub use field::{FieldEdit, FieldStatus};

#[cfg(test)]
pub use field::{FieldError, ValidationRule};
