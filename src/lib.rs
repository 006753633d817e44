//! # Bikeshare - US Bikeshare Data Explorer
//!
//! Loads historical trip records for Chicago, New York City and Washington,
//! filters them by month and weekday, and reports descriptive statistics:
//! popular travel times, popular stations, trip duration totals and rider
//! demographics.
//!
//! ## Core Modules
//!
//! - [`explorer`]: prompts, dataset loading, row paging, reports and the session loop
//!   - [`explorer::loader`]: polars-based CSV loading and filtering
//!   - [`explorer::stats`]: the four statistics reporters
//! - [`config`]: data directory, page size and the city-to-file table
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: `tracing` setup with a rolling log file
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikeshare::config::AppConfig;
//! use bikeshare::explorer::{FilterSelection, City, load_data};
//! use bikeshare::explorer::stats::time_stats;
//!
//! let config = AppConfig { data_dir: "data".into(), ..Default::default() };
//! let selection = FilterSelection::unfiltered(City::Chicago);
//! let view = load_data(&config, &selection)?;
//! println!("{}", time_stats(&view, &selection)?);
//! # Ok::<(), bikeshare::error::BikeshareError>(())
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod explorer;
pub mod logging;
