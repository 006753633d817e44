//! Descriptive statistics over a filtered view.
//!
//! Each reporter is a pure function from the view to a typed report with a
//! `Display` rendering. [`run_report`] prints a report under its heading and
//! times it; [`report_all`] runs the four reporters in session order.
//!
//! Modes are sorted ascending before the first is taken, so a tie for the
//! most frequent value always resolves to the lowest value.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

pub use duration::{DurationStats, trip_duration_stats};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use user::{BirthYears, UserStats, user_stats};

use super::filters::FilterSelection;
use crate::error::Result;
use polars::prelude::*;
use std::fmt;
use std::io::Write;
use std::time::Instant;

/// Name of the count column produced by [`value_counts`].
pub const COUNTS: &str = "counts";

/// Printed after every report and after the filter prompts.
pub fn separator() -> String {
    "-".repeat(40)
}

/// Most frequent value of a column; `None` for an empty view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popular<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for Popular<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("n/a"),
        }
    }
}

/// Every most frequent non-null value of `expr`, in ascending order.
///
/// # Errors
///
/// Fails if the expression references a missing column.
pub fn modes_of(view: &DataFrame, expr: Expr) -> Result<Series> {
    let modes = view
        .clone()
        .lazy()
        .select([expr
            .drop_nulls()
            .mode()
            .sort(SortOptions::default())
            .alias("mode")])
        .collect()?;
    Ok(modes.column("mode")?.as_materialized_series().clone())
}

/// Lowest most frequent value of a text column.
///
/// # Errors
///
/// Fails if the column is missing.
pub fn mode_string(view: &DataFrame, name: &str) -> Result<Option<String>> {
    let modes = modes_of(view, col(name).cast(DataType::String))?;
    Ok(modes.str()?.get(0).map(str::to_owned))
}

/// Lowest most frequent value of a numeric column, truncated to an integer.
///
/// # Errors
///
/// Fails if the column is missing or not numeric.
pub fn mode_int(view: &DataFrame, name: &str) -> Result<Option<i64>> {
    let modes = modes_of(view, col(name).cast(DataType::Int64))?;
    Ok(modes.i64()?.get(0))
}

/// Non-null value counts of a column, most frequent first and ties by value.
///
/// # Errors
///
/// Fails if the column is missing.
pub fn value_counts(view: &DataFrame, name: &str) -> Result<Vec<(String, usize)>> {
    let series = view
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?
        .drop_nulls();
    let counts = series
        .value_counts(false, false, COUNTS.into(), false)?
        .lazy()
        .sort_by_exprs(
            [col(COUNTS), col(name)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let values = counts.column(name)?.as_materialized_series();
    let totals = counts
        .column(COUNTS)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;

    Ok(values
        .str()?
        .into_iter()
        .zip(totals.u64()?)
        .filter_map(|(value, count)| Some((value?.to_owned(), count? as usize)))
        .collect())
}

/// Print `heading`, the computed report and how long it took.
///
/// # Errors
///
/// Propagates failures from `compute` and from writing to `out`.
pub fn run_report<T, F>(out: &mut dyn Write, heading: &str, compute: F) -> Result<T>
where
    T: fmt::Display,
    F: FnOnce() -> Result<T>,
{
    writeln!(out, "\n{heading}\n")?;
    let start = Instant::now();
    let report = compute()?;
    write!(out, "{report}")?;
    let elapsed = start.elapsed();

    tracing::debug!(heading, ?elapsed, "Report finished");
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", separator())?;
    Ok(report)
}

/// Run the four reporters in order.
///
/// # Errors
///
/// Stops at the first reporter that fails.
pub fn report_all(
    out: &mut dyn Write,
    view: &DataFrame,
    selection: &FilterSelection,
) -> Result<()> {
    run_report(out, "Calculating The Most Frequent Times of Travel...", || {
        time_stats(view, selection)
    })?;
    run_report(out, "Calculating The Most Popular Stations and Trip...", || {
        station_stats(view)
    })?;
    run_report(out, "Calculating Trip Duration...", || trip_duration_stats(view))?;
    run_report(out, "Calculating User Stats...", || user_stats(view))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_picks_lowest_on_tie() -> Result<()> {
        let view = df!("name" => &["b", "a", "b", "a", "c"])?;
        assert_eq!(mode_string(&view, "name")?, Some("a".to_owned()));

        let modes = modes_of(&view, col("name"))?;
        let modes: Vec<Option<&str>> = modes.str()?.into_iter().collect();
        assert_eq!(modes, vec![Some("a"), Some("b")]);
        Ok(())
    }

    #[test]
    fn test_mode_numeric_order() -> Result<()> {
        let view = df!("hour" => &[17_i32, 8, 17, 8, 10])?;
        assert_eq!(mode_int(&view, "hour")?, Some(8));
        Ok(())
    }

    #[test]
    fn test_mode_of_nothing() -> Result<()> {
        let view = df!("hour" => &[17_i32])?.clear();
        assert_eq!(mode_int(&view, "hour")?, None);
        assert!(modes_of(&view, col("hour"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_mode_skips_nulls() -> Result<()> {
        let view = df!("name" => &[None, None, Some("x"), Some("y"), Some("y")])?;
        assert_eq!(mode_string(&view, "name")?, Some("y".to_owned()));
        Ok(())
    }

    #[test]
    fn test_value_counts_order_by_count_then_value() -> Result<()> {
        let view = df!(
            "user" => &[
                Some("Customer"),
                Some("Subscriber"),
                None,
                Some("Subscriber"),
                Some("Dependent"),
                Some("Customer"),
            ]
        )?;
        assert_eq!(
            value_counts(&view, "user")?,
            vec![
                ("Customer".to_owned(), 2),
                ("Subscriber".to_owned(), 2),
                ("Dependent".to_owned(), 1),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_run_report_prints_heading_timing_and_separator() -> Result<()> {
        let mut out = Vec::new();
        let value = run_report(&mut out, "Calculating Things...", || Ok(Popular(Some(42))))?;
        assert_eq!(value, Popular(Some(42)));

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\nCalculating Things...\n\n42"));
        assert!(text.contains("This took "));
        assert!(text.ends_with(&format!("{}\n", separator())));
        Ok(())
    }

    #[test]
    fn test_popular_display() {
        assert_eq!(Popular(Some("Monday")).to_string(), "Monday");
        assert_eq!(Popular::<i64>(None).to_string(), "n/a");
    }
}
