use crate::error::Result;
use crate::explorer::loader::TRIP_DURATION;
use polars::prelude::*;
use std::fmt;

/// Trip duration totals in seconds, as stored in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    /// `None` for an empty view
    pub mean: Option<f64>,
}

/// # Errors
///
/// Fails if the duration column is missing or not numeric.
pub fn trip_duration_stats(view: &DataFrame) -> Result<DurationStats> {
    let durations = view
        .column(TRIP_DURATION)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let ca = durations.f64()?;

    Ok(DurationStats {
        total: ca.sum().unwrap_or(0.0),
        mean: ca.mean(),
    })
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The total travel time is: {} seconds", self.total)?;
        match self.mean {
            Some(mean) => writeln!(f, "The average travel time is: {mean:.2} seconds"),
            None => writeln!(f, "The average travel time is: n/a"),
        }
    }
}
