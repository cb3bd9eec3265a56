//! Output of the report run.
//!
//! This module handles everything that leaves the process:
//! - [`csv`] - CSV report file
//! - [`terminal`] - Operator console and colored status lines

mod csv;
mod terminal;

pub use csv::{escape_csv_field, write_report, write_rows};
pub use terminal::{failure, progress, success, warning, Console, Terminal};

#[cfg(test)]
pub(crate) use terminal::ScriptedConsole;
