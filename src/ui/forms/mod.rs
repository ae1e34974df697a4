//! Form rendering module
//!
//! - `field_renderer`: one question card
//! - `question_form`: the full list of cards plus the submit button

mod field_renderer;
mod question_form;

pub use question_form::draw_question_form;
