use super::loader::page;
use super::prompt::{ChoicePrompt, Console, ask_choice};
use crate::error::Result;
use polars::prelude::DataFrame;
use std::str::FromStr;

/// Answer to "show the next page?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAnswer {
    Show,
    Stop,
}

impl FromStr for PageAnswer {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "y" | "yes" => Ok(Self::Show),
            "n" | "no" => Ok(Self::Stop),
            _ => Err(()),
        }
    }
}

/// Page through `view`, `page_size` rows at a time, until the user says no.
///
/// Returns the offset of the first row not shown.
///
/// # Errors
///
/// Propagates console failures.
pub fn display_rows(
    console: &mut dyn Console,
    view: &DataFrame,
    mut offset: usize,
    page_size: usize,
) -> Result<usize> {
    loop {
        let question = format!(
            "Would you like to see the rows {offset} to {} of data? Y/N",
            offset + page_size
        );
        let prompt = ChoicePrompt {
            question: &question,
            invalid: "Invalid Answer. please select either Y or N",
            interrupted: "Program Interrupted. Please Try Again",
        };

        match ask_choice::<PageAnswer>(console, &prompt)? {
            PageAnswer::Show => {
                writeln!(console.out(), "{}", page(view, offset, page_size))?;
                offset += page_size;
            }
            PageAnswer::Stop => return Ok(offset),
        }
    }
}
