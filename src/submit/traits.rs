//! Trait abstraction for the submit handler to enable mocking in tests

use crate::state::FormValues;
use anyhow::Result;

/// Receives the answers of a form that passed validation
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    /// Called once per successful submit with a snapshot keyed by question id
    fn on_submit(&mut self, values: &FormValues) -> Result<()>;
}
