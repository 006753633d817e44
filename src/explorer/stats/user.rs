use super::{modes_of, value_counts};
use crate::error::Result;
use crate::explorer::loader::{BIRTH_YEAR, GENDER, USER_TYPE, has_column};
use polars::prelude::*;
use std::fmt;

/// Rider demographics. `Gender` and `Birth Year` only exist for some cities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYears>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: Option<i64>,
    pub most_recent: Option<i64>,
    /// All years tied for the highest count
    pub most_common: Vec<i64>,
}

/// # Errors
///
/// Fails if `User Type` is missing, or an optional column that is present
/// has the wrong type.
pub fn user_stats(view: &DataFrame) -> Result<UserStats> {
    let user_types = value_counts(view, USER_TYPE)?;

    let genders = if has_column(view, GENDER) {
        Some(value_counts(view, GENDER)?)
    } else {
        None
    };

    let birth_years = if has_column(view, BIRTH_YEAR) {
        Some(birth_years(view)?)
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn birth_years(view: &DataFrame) -> Result<BirthYears> {
    let years = view
        .column(BIRTH_YEAR)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let most_common = modes_of(view, col(BIRTH_YEAR).cast(DataType::Int64))?;

    Ok(BirthYears {
        earliest: years.min::<i64>()?,
        most_recent: years.max::<i64>()?,
        most_common: most_common.i64()?.into_iter().flatten().collect(),
    })
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[(String, usize)]) -> fmt::Result {
    for (value, count) in counts {
        writeln!(f, "  {value}: {count}")?;
    }
    Ok(())
}

fn fmt_year(year: Option<i64>) -> String {
    year.map_or_else(|| "n/a".to_owned(), |y| y.to_string())
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The counts of user types are as follows:")?;
        write_counts(f, &self.user_types)?;

        match &self.genders {
            Some(genders) => {
                writeln!(f, "The counts of genders are as follows:")?;
                write_counts(f, genders)?;
            }
            None => writeln!(f, "This city doesn't have data on gender")?,
        }

        match &self.birth_years {
            Some(years) => {
                let common = if years.most_common.is_empty() {
                    "n/a".to_owned()
                } else {
                    years
                        .most_common
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                writeln!(f, "The earliest birth year is: {}", fmt_year(years.earliest))?;
                writeln!(
                    f,
                    "The most recent birth year is: {}",
                    fmt_year(years.most_recent)
                )?;
                writeln!(f, "The most common year of birth is: {common}")
            }
            None => writeln!(f, "This city doesn't have data on users' birth years"),
        }
    }
}
