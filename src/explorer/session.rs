use super::filters::{City, DayFilter, FilterSelection, MonthFilter};
use super::loader::load_data;
use super::prompt::{ChoicePrompt, Console, Reply, ask_choice};
use super::stats::{report_all, separator};
use super::viewer::display_rows;
use crate::config::AppConfig;
use crate::error::{BikeshareError, Result};

const CITY_PROMPT: ChoicePrompt<'static> = ChoicePrompt {
    question: "Would you like to explore Chicago, New York, or Washington?",
    invalid: "Invalid Input. Please try again. Use the name of the city as listed",
    interrupted: "Program interrupted. Please try again.",
};

const MONTH_PROMPT: ChoicePrompt<'static> = ChoicePrompt {
    question: "Which month would you like to explore?\nJanuary, February, March, April, May, June, or all?",
    invalid: "Invalid input. Please try again. Use the name of the month as listed.",
    interrupted: "Program interrupted. Please try again.",
};

const DAY_PROMPT: ChoicePrompt<'static> = ChoicePrompt {
    question: "Which day would you like to explore?\nMonday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or all?",
    invalid: "Invalid input. Please try again. Use the name of the day as listed.",
    interrupted: "Program interrupted. Please try again.",
};

const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or enter any key to exit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Ended,
}

/// Ask for city, month and day.
///
/// # Errors
///
/// Propagates console failures, including [`BikeshareError::Aborted`].
pub fn get_filters(console: &mut dyn Console) -> Result<FilterSelection> {
    writeln!(console.out(), "Hello! Let's explore some US bikeshare data!")?;
    let city: City = ask_choice(console, &CITY_PROMPT)?;
    let month: MonthFilter = ask_choice(console, &MONTH_PROMPT)?;
    let day: DayFilter = ask_choice(console, &DAY_PROMPT)?;
    writeln!(console.out(), "{}", separator())?;

    Ok(FilterSelection::new(city, month, day))
}

/// Collect filters, load, page, report.
///
/// # Errors
///
/// Returns [`BikeshareError::DataUnavailable`] if the dataset cannot be
/// loaded, and propagates console and reporting failures.
pub fn run_iteration(console: &mut dyn Console, config: &AppConfig) -> Result<FilterSelection> {
    let selection = get_filters(console)?;
    let view = load_data(config, &selection)?;
    display_rows(console, &view, 0, config.page_size)?;
    report_all(console.out(), &view, &selection)?;
    Ok(selection)
}

/// Whether to go round again.
///
/// `yes`/`y` continue, an interrupt continues, anything else ends.
///
/// # Errors
///
/// Propagates console failures other than end of input, which ends the session.
pub fn ask_restart(console: &mut dyn Console) -> Result<SessionState> {
    match console.ask(RESTART_QUESTION) {
        Ok(Reply::Line(answer)) => {
            let answer = answer.to_lowercase();
            if answer == "yes" || answer == "y" {
                Ok(SessionState::Running)
            } else {
                Ok(SessionState::Ended)
            }
        }
        Ok(Reply::Interrupted) => {
            writeln!(console.out(), "Program Interrupted...Restarting")?;
            Ok(SessionState::Running)
        }
        Err(BikeshareError::Aborted) => Ok(SessionState::Ended),
        Err(e) => Err(e),
    }
}

/// Run sessions until the user declines to restart or input ends.
///
/// A dataset that cannot be loaded ends the current iteration only; the
/// failure is reported on the console's error stream.
///
/// # Errors
///
/// Returns console I/O failures and unexpected processing errors.
pub fn run(console: &mut dyn Console, config: &AppConfig) -> Result<()> {
    let mut state = SessionState::Running;
    let mut iterations = 0_usize;

    while state == SessionState::Running {
        iterations += 1;
        match run_iteration(console, config) {
            Ok(selection) => tracing::info!(iterations, %selection, "Iteration complete"),
            Err(BikeshareError::Aborted) => {
                tracing::info!(iterations, "Input closed, ending session");
                return Ok(());
            }
            Err(BikeshareError::DataUnavailable(msg)) => {
                tracing::error!(error = %msg, "Could not load city data");
                writeln!(console.err(), "Data unavailable: {msg}")?;
            }
            Err(e) => return Err(e),
        }
        state = ask_restart(console)?;
    }

    tracing::info!(iterations, "Session ended");
    Ok(())
}
