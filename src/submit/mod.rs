//! Submit handler boundary
//!
//! The coordinator calls exactly one handler with the validated answers.

mod console;
mod traits;

pub use console::ConsoleSubmitHandler;
pub use traits::SubmitHandler;

#[cfg(test)]
pub use traits::MockSubmitHandler;
