//! Interactive bikeshare data explorer
//!
//! One session iteration runs these steps in order:
//!
//! ```text
//! session::run
//!   │
//!   ├─> session::get_filters   city / month / day prompts (prompt::ask_choice)
//!   ├─> loader::load_data      CSV -> DataFrame, derive hour/month/day_of_week, filter
//!   ├─> viewer::display_rows   optional pages of raw rows
//!   ├─> stats::report_all      time, station, duration and user reports
//!   └─> session::ask_restart   yes/y (or Ctrl+C) goes round again
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bikeshare::config::AppConfig;
//! use bikeshare::explorer::prompt::ScriptedConsole;
//! use bikeshare::explorer::session;
//!
//! let mut console = ScriptedConsole::from_lines(["washington", "all", "all", "n", "no"]);
//! session::run(&mut console, &AppConfig::default())?;
//! println!("{}", console.output());
//! # Ok::<(), bikeshare::error::BikeshareError>(())
//! ```

pub mod filters;
pub mod loader;
pub mod prompt;
pub mod session;
pub mod stats;
pub mod viewer;

pub use filters::{City, DayFilter, FilterSelection, MonthFilter};
pub use loader::load_data;
pub use prompt::{Console, LineConsole, Reply, ScriptedConsole, StdConsole};
pub use session::{SessionState, run};
