//! Calendar helpers: month boundaries, ISO weeks, parsing of user dates.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Months, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// First day of the month containing `d`.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// First day of the month after the one containing `d`.
pub fn next_month(d: NaiveDate) -> NaiveDate {
    let first = month_start(d);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// Last day of the month containing `d`.
pub fn month_end(d: NaiveDate) -> NaiveDate {
    next_month(d).pred_opt().unwrap_or(d)
}

pub fn year_bounds(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AppError::InvalidPeriod(year.to_string()))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| AppError::InvalidPeriod(year.to_string()))?;
    Ok((first, last))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Parse "YYYY-MM" into the first day of that month.
pub fn parse_month(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidPeriod(s.to_string()))
}
