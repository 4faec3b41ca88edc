use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::Serialize;

/// A worked interval on a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkRecord {
    pub id: i64,          // ⇔ work_records.id
    pub date: NaiveDate,  // ⇔ work_records.date (TEXT "YYYY-MM-DD")
    pub start: NaiveTime, // ⇔ work_records.start_time (TEXT "HH:MM")
    pub end: NaiveTime,   // ⇔ work_records.end_time (TEXT "HH:MM")
}

impl WorkRecord {
    /// Builds a record, rejecting intervals that end before they start.
    /// Use `id = 0` for records not yet persisted.
    pub fn new(id: i64, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidInterval(format!(
                "end {} is before start {} on {}",
                end.format("%H:%M"),
                start.format("%H:%M"),
                date
            )));
        }

        Ok(Self {
            id,
            date,
            start,
            end,
        })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn duration_seconds(&self) -> i64 {
        self.duration().num_seconds()
    }

    pub fn start_str(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}
