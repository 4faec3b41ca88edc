// src/export/range.rs

use crate::errors::{AppError, AppResult};

/// Parse --range into an inclusive, ascending list of years.
///
/// Supports:
/// - YYYY
/// - YYYY:YYYY
pub(crate) fn parse_years(r: &str) -> AppResult<Vec<i32>> {
    let (start_raw, end_raw) = r.split_once(':').unwrap_or((r, r));

    let start = parse_year(start_raw.trim())?;
    let end = parse_year(end_raw.trim())?;

    if end < start {
        return Err(AppError::InvalidPeriod(format!(
            "range ends ({end}) before it starts ({start})"
        )));
    }

    Ok((start..=end).collect())
}

fn parse_year(s: &str) -> AppResult<i32> {
    if s.len() != 4 {
        return Err(AppError::InvalidPeriod(format!(
            "unsupported --range format: {s}"
        )));
    }
    s.parse()
        .map_err(|_| AppError::InvalidPeriod(format!("invalid year: {s}")))
}
