use super::filters::{DayFilter, FilterSelection, MonthFilter, weekday_name};
use crate::config::AppConfig;
use crate::error::{BikeshareError, Result};
use polars::prelude::*;
use std::path::Path;

pub const START_TIME: &str = "Start Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

pub const HOUR: &str = "hour";
pub const MONTH: &str = "month";
pub const DAY_OF_WEEK: &str = "day_of_week";

/// Layout of `Start Time` values.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Columns every city dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [START_TIME, START_STATION, END_STATION, TRIP_DURATION, USER_TYPE];

/// Load the dataset for `selection.city` from `config.data_dir` and apply
/// the month and day filters.
///
/// # Errors
///
/// Returns [`BikeshareError::DataUnavailable`] if the file is missing, cannot
/// be parsed, lacks a required column, or has a blank or unparseable
/// `Start Time`.
pub fn load_data(config: &AppConfig, selection: &FilterSelection) -> Result<DataFrame> {
    let path = config.city_file(selection.city);
    tracing::info!(path = %path.display(), %selection, "Loading city data");

    let lf = scan_city_file(&path)?;
    let view = filtered_view(lf, selection.month, selection.day)
        .collect()
        .map_err(|e| unavailable(&path, &e))?;

    let missing = view.column(START_TIME)?.null_count();
    if missing > 0 {
        tracing::warn!(path = %path.display(), missing, "Rows without a start time");
        return Err(BikeshareError::DataUnavailable(format!(
            "{}: {missing} rows have no '{START_TIME}'",
            path.display()
        )));
    }

    tracing::info!(rows = view.height(), "Filtered view ready");
    Ok(view)
}

/// Lazily scan a city CSV and check it has the required columns.
///
/// # Errors
///
/// Returns [`BikeshareError::DataUnavailable`] for a missing or malformed file.
pub fn scan_city_file(path: &Path) -> Result<LazyFrame> {
    if !path.is_file() {
        return Err(BikeshareError::DataUnavailable(format!(
            "{} not found",
            path.display()
        )));
    }

    let mut lf = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .finish()
        .map_err(|e| unavailable(path, &e))?;

    let schema = lf.collect_schema().map_err(|e| unavailable(path, &e))?;
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|name| schema.get(name).is_none())
    {
        return Err(BikeshareError::DataUnavailable(format!(
            "{} has no '{missing}' column",
            path.display()
        )));
    }

    Ok(lf)
}

/// Derive time columns, then apply whichever filters are not `All`.
pub fn filtered_view(lf: LazyFrame, month: MonthFilter, day: DayFilter) -> LazyFrame {
    tracing::debug!(%month, %day, "Applying filters");
    filter_by_day(filter_by_month(with_time_columns(lf), month), day)
}

/// Parse `Start Time` and add `hour`, `month` and `day_of_week`.
///
/// Parsing is strict: a single value not in [`START_TIME_FORMAT`] fails the
/// whole collect.
pub fn with_time_columns(lf: LazyFrame) -> LazyFrame {
    let start = col(START_TIME);
    let options = StrptimeOptions {
        format: Some(START_TIME_FORMAT.into()),
        strict: true,
        exact: true,
        cache: true,
    };
    lf.with_column(
        start
            .clone()
            .str()
            .to_datetime(Some(TimeUnit::Microseconds), None, options, lit("raise"))
            .alias(START_TIME),
    )
    .with_columns([
        start.clone().dt().hour().cast(DataType::Int32).alias(HOUR),
        start.clone().dt().month().cast(DataType::Int32).alias(MONTH),
        start.dt().strftime("%A").alias(DAY_OF_WEEK),
    ])
}

/// Keep rows from the given month. Requires [`with_time_columns`].
pub fn filter_by_month(lf: LazyFrame, month: MonthFilter) -> LazyFrame {
    match month.number() {
        Some(number) => lf.filter(col(MONTH).eq(lit(number as i32))),
        None => lf,
    }
}

/// Keep rows from the given weekday. Requires [`with_time_columns`].
pub fn filter_by_day(lf: LazyFrame, day: DayFilter) -> LazyFrame {
    match day {
        DayFilter::All => lf,
        DayFilter::Only(weekday) => lf.filter(col(DAY_OF_WEEK).eq(lit(weekday_name(weekday)))),
    }
}

/// Rows `[offset, offset + len)`; empty once `offset` passes the end.
pub fn page(view: &DataFrame, offset: usize, len: usize) -> DataFrame {
    if offset >= view.height() {
        return view.clear();
    }
    view.slice(offset as i64, len)
}

/// Whether the view carries a column called `name`.
pub fn has_column(view: &DataFrame, name: &str) -> bool {
    view.get_column_index(name).is_some()
}

fn unavailable(path: &Path, err: &PolarsError) -> BikeshareError {
    tracing::warn!(path = %path.display(), error = %err, "Dataset could not be read");
    BikeshareError::DataUnavailable(format!("{}: {err}", path.display()))
}
