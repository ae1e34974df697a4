//! Submit handler that logs answers and replays them on stdout at exit

use super::traits::SubmitHandler;
use crate::state::FormValues;
use anyhow::Result;
use std::io::Write;

/// Logs each submission and keeps it as a JSON line.
///
/// The TUI owns the terminal while running, so the collected lines are
/// written out by `write_to` once the terminal is restored.
#[derive(Debug, Default)]
pub struct ConsoleSubmitHandler {
    lines: Vec<String>,
}

impl ConsoleSubmitHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[String] {
        &self.lines
    }

    /// Write every collected submission, one JSON object per line
    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl SubmitHandler for ConsoleSubmitHandler {
    fn on_submit(&mut self, values: &FormValues) -> Result<()> {
        let json = serde_json::to_string(values)?;
        tracing::info!(answers = %json, "received answers");
        self.lines.push(json);
        Ok(())
    }
}
