use super::{Popular, mode_int, mode_string};
use crate::error::Result;
use crate::explorer::filters::{DayFilter, FilterSelection, MonthFilter};
use crate::explorer::loader::{DAY_OF_WEEK, HOUR, MONTH};
use polars::prelude::DataFrame;
use std::fmt;

/// Most frequent times of travel.
///
/// Month and day are only reported when the view was not filtered on them,
/// since a filtered column holds a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Option<Popular<i64>>,
    pub day: Option<Popular<String>>,
    pub hour: Popular<i64>,
}

/// # Errors
///
/// Fails if the view lacks the derived time columns.
pub fn time_stats(view: &DataFrame, selection: &FilterSelection) -> Result<TimeStats> {
    let month = match selection.month {
        MonthFilter::All => Some(Popular(mode_int(view, MONTH)?)),
        MonthFilter::Only(_) => None,
    };
    let day = match selection.day {
        DayFilter::All => Some(Popular(mode_string(view, DAY_OF_WEEK)?)),
        DayFilter::Only(_) => None,
    };
    let hour = Popular(mode_int(view, HOUR)?);

    Ok(TimeStats { month, day, hour })
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(month) = &self.month {
            writeln!(f, "The most popular month is: {month}")?;
        }
        if let Some(day) = &self.day {
            writeln!(f, "The most popular day is: {day}")?;
        }
        writeln!(f, "The most popular hour is: {}", self.hour)
    }
}
