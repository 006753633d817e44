use super::{Popular, mode_string};
use crate::error::Result;
use crate::explorer::loader::{END_STATION, START_STATION};
use polars::prelude::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start: Popular<String>,
    pub end: Popular<String>,
    /// Most frequent `(start, end)` pair
    pub trip: Popular<(String, String)>,
}

/// # Errors
///
/// Fails if either station column is missing.
pub fn station_stats(view: &DataFrame) -> Result<StationStats> {
    let start = Popular(mode_string(view, START_STATION)?);
    let end = Popular(mode_string(view, END_STATION)?);
    let trip = Popular(popular_trip(view)?);

    Ok(StationStats { start, end, trip })
}

const TRIPS: &str = "trips";

/// Most frequent start/end pair among rows where both stations are present.
///
/// Ties go to the first pair in sorted order.
fn popular_trip(view: &DataFrame) -> Result<Option<(String, String)>> {
    let top = view
        .clone()
        .lazy()
        .filter(
            col(START_STATION)
                .is_not_null()
                .and(col(END_STATION).is_not_null()),
        )
        .group_by([col(START_STATION), col(END_STATION)])
        .agg([len().alias(TRIPS)])
        .sort_by_exprs(
            [col(TRIPS), col(START_STATION), col(END_STATION)],
            SortMultipleOptions::default().with_order_descending_multi([true, false, false]),
        )
        .limit(1)
        .collect()?;

    let start = first_string(&top, START_STATION)?;
    let end = first_string(&top, END_STATION)?;
    Ok(start.zip(end))
}

fn first_string(df: &DataFrame, name: &str) -> Result<Option<String>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series.str()?.get(0).map(str::to_owned))
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The most popular start station is: {}", self.start)?;
        writeln!(f, "The most popular end station is: {}", self.end)?;
        match &self.trip.0 {
            Some((start, end)) => writeln!(
                f,
                "The most popular combination of start and end stations is: {start} -> {end}"
            ),
            None => writeln!(
                f,
                "The most popular combination of start and end stations is: n/a"
            ),
        }
    }
}
