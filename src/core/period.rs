use crate::core::timeline::TimelineMerger;
use crate::db::queries::{load_holidays_between, load_leave_between, load_work_between};
use crate::errors::AppResult;
use crate::models::{LeaveRecord, WorkRecord};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Snapshot of the three per-day sources for one bounded period.
#[derive(Debug, Clone, Default)]
pub struct PeriodData {
    pub work: Vec<WorkRecord>,
    pub leave: Vec<LeaveRecord>,
    pub holidays: Vec<NaiveDate>,
}

impl PeriodData {
    pub fn load(conn: &Connection, start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        Ok(Self {
            work: load_work_between(conn, start, end)?,
            leave: load_leave_between(conn, start, end)?,
            holidays: load_holidays_between(conn, start, end)?
                .into_iter()
                .map(|h| h.date)
                .collect(),
        })
    }

    pub fn merger(&self) -> TimelineMerger<'_> {
        TimelineMerger::new(&self.work, &self.leave, &self.holidays)
    }
}
