//! City, month and day selections.
//!
//! Each choice parses from the exact (case-insensitive) name the prompts ask
//! for; abbreviations are rejected.

use chrono::{Month, Weekday};
use std::fmt;
use std::str::FromStr;

/// Returned when a reply does not name one of the listed choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice(pub String);

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not one of the listed choices", self.0)
    }
}

impl std::error::Error for UnknownChoice {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYork, Self::Washington];

    /// Name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYork => "new york",
            Self::Washington => "washington",
        }
    }

    /// Dataset file name, relative to the data directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYork => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.name() == lowered)
            .ok_or_else(|| UnknownChoice(s.to_owned()))
    }
}

/// Months covered by the datasets.
pub const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// 1-based month number, `None` for `All`.
    pub fn number(self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Only(month) => Some(month.number_from_month()),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(month) => f.write_str(month.name()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        if lowered == "all" {
            return Ok(Self::All);
        }
        MONTHS
            .into_iter()
            .find(|month| month.name().to_lowercase() == lowered)
            .map(Self::Only)
            .ok_or_else(|| UnknownChoice(s.to_owned()))
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name, matching the `day_of_week` column.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        if lowered == "all" {
            return Ok(Self::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).to_lowercase() == lowered)
            .map(Self::Only)
            .ok_or_else(|| UnknownChoice(s.to_owned()))
    }
}

/// The three answers collected at the start of each session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// No month or day restriction.
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, MonthFilter::All, DayFilter::All)
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={} month={} day={}", self.city, self.month, self.day)
    }
}
