use crate::errors::{AppError, AppResult};
use crate::utils::date::month_start;
use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;

/// Closed set of reasons a day can be taken off for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LeaveReason {
    Vacation,
    Sick,
    Other,
}

impl LeaveReason {
    /// Column order used by summaries and exports.
    pub const ALL: [LeaveReason; 3] = [LeaveReason::Vacation, LeaveReason::Sick, LeaveReason::Other];

    pub fn label(&self) -> &'static str {
        match self {
            LeaveReason::Vacation => "Vacation",
            LeaveReason::Sick => "Sick",
            LeaveReason::Other => "Other",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveReason::Vacation => "vacation",
            LeaveReason::Sick => "sick",
            LeaveReason::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "vacation" => Some(LeaveReason::Vacation),
            "sick" => Some(LeaveReason::Sick),
            "other" => Some(LeaveReason::Other),
            _ => None,
        }
    }
}

/// One persisted leave day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveRecord {
    pub date: NaiveDate,     // ⇔ leave_records.date (PK, one row per day)
    pub reason: LeaveReason, // ⇔ leave_records.reason
}

impl LeaveRecord {
    pub fn new(date: NaiveDate, reason: LeaveReason) -> Self {
        Self { date, reason }
    }
}

/// Contiguous run of leave days sharing one reason. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reason: LeaveReason,
}

impl LeaveRange {
    pub fn new(start: NaiveDate, end: NaiveDate, reason: LeaveReason) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidInterval(format!(
                "leave range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end, reason })
    }

    pub fn single(date: NaiveDate, reason: LeaveReason) -> Self {
        Self {
            start: date,
            end: date,
            reason,
        }
    }

    /// Number of calendar days covered (inclusive). Zero for an inverted range.
    pub fn day_count(&self) -> u64 {
        u64::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date of the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.day_count()).filter_map(move |i| start.checked_add_days(Days::new(i)))
    }

    /// One leave record per day of the range.
    pub fn records(&self) -> Vec<LeaveRecord> {
        self.days().map(|d| LeaveRecord::new(d, self.reason)).collect()
    }

    /// Distinct first-of-month values touched by the range.
    pub fn affected_months(&self) -> BTreeSet<NaiveDate> {
        self.days().map(month_start).collect()
    }
}
