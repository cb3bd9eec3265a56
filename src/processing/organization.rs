//! Organization selection.

use crate::error::ReportError;
use crate::models::Organization;
use crate::output::{success, warning, Console};
use std::num::{IntErrorKind, ParseIntError};
use thiserror::Error;

const SELECT_PROMPT: &str = "\nEnter the number of the organization to use: ";

/// Why an operator's answer was not accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please enter a valid number.")]
    NotANumber,
    #[error("Invalid selection. Try again.")]
    OutOfRange,
}

/// Parse a 1-based choice among `count` entries into a 0-based index.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, SelectionError> {
    let choice: i64 = input.trim().parse().map_err(|e: ParseIntError| match e.kind() {
        // Still a whole number, just not one on the list.
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => SelectionError::OutOfRange,
        _ => SelectionError::NotANumber,
    })?;
    if choice >= 1 && (choice as u64) <= count as u64 {
        Ok(choice as usize - 1)
    } else {
        Err(SelectionError::OutOfRange)
    }
}

/// Pick the organization to report on.
///
/// A single organization is taken without asking. With several, the
/// operator chooses from a numbered list until the answer is valid.
pub fn select_organization<C>(
    organizations: &[Organization],
    console: &mut C,
) -> Result<Organization, ReportError>
where
    C: Console + ?Sized,
{
    match organizations {
        [] => Err(ReportError::NoOrganizations),
        [only] => {
            console.say(&success(&format!("One organization found: {only}")));
            Ok(only.clone())
        }
        many => {
            console.say("Select an organization:");
            for (i, org) in many.iter().enumerate() {
                console.say(&format!("{}. {org}", i + 1));
            }
            loop {
                let answer = console.read_line(SELECT_PROMPT)?;
                match parse_selection(&answer, many.len()) {
                    Ok(index) => {
                        let chosen = &many[index];
                        log::info!("Selected organization {}", chosen.id);
                        console.say(&success(&format!("Selected: {chosen}")));
                        return Ok(chosen.clone());
                    }
                    Err(e) => {
                        log::debug!("Rejected organization choice {answer:?}: {e}");
                        console.say(&warning(&e.to_string()));
                    }
                }
            }
        }
    }
}
