//! Application state module

mod app_state;
mod catalog;
mod forms;
mod ui_area;

pub use app_state::*;
pub use catalog::*;
pub use forms::*;
pub use ui_area::*;
