//! Ordered merge of work records, leave records and holidays.
//!
//! The merger walks three date-sorted sequences in lockstep and reports,
//! in ascending date order, one `Work`/`Leave` event per stored record
//! plus a `WeekStart` event whenever the ISO week changes. It keeps no
//! totals of its own: callers fold the events into a [`Summary`] or
//! render them directly.
//!
//! [`Summary`]: crate::core::summary::Summary

use crate::errors::{AppError, AppResult};
use crate::models::{LeaveRecord, WorkRecord};
use chrono::{Datelike, IsoWeek, NaiveDate};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent<'a> {
    /// First date seen in a new ISO week. Emitted before that date's records.
    WeekStart { date: NaiveDate, week: IsoWeek },
    Work(&'a WorkRecord),
    Leave(&'a LeaveRecord),
}

impl TimelineEvent<'_> {
    pub fn date(&self) -> NaiveDate {
        match self {
            TimelineEvent::WeekStart { date, .. } => *date,
            TimelineEvent::Work(w) => w.date,
            TimelineEvent::Leave(l) => l.date,
        }
    }

    /// `true` for events that correspond to a stored record.
    pub fn is_visitation(&self) -> bool {
        !matches!(self, TimelineEvent::WeekStart { .. })
    }
}

pub struct TimelineMerger<'a> {
    work: &'a [WorkRecord],
    leave: &'a [LeaveRecord],
    holidays: &'a [NaiveDate],
}

impl<'a> TimelineMerger<'a> {
    pub fn new(work: &'a [WorkRecord], leave: &'a [LeaveRecord], holidays: &'a [NaiveDate]) -> Self {
        Self {
            work,
            leave,
            holidays,
        }
    }

    /// Drives `visit` with every event in date order.
    ///
    /// Fails without emitting anything if an input is out of order or a date
    /// holds both a work record and a leave record. An error returned by
    /// `visit` stops the merge and is passed through.
    pub fn run<F>(&self, mut visit: F) -> AppResult<()>
    where
        F: FnMut(TimelineEvent<'a>) -> AppResult<()>,
    {
        self.check_inputs()?;

        let (work, leave, holidays) = (self.work, self.leave, self.holidays);
        let (mut wi, mut li, mut hi) = (0, 0, 0);
        let mut current_week: Option<IsoWeek> = None;
        let mut visited = 0usize;

        loop {
            let next = [
                work.get(wi).map(|w| w.date),
                leave.get(li).map(|l| l.date),
                holidays.get(hi).copied(),
            ]
            .into_iter()
            .flatten()
            .min();

            let Some(date) = next else {
                break;
            };

            let week = date.iso_week();
            if current_week != Some(week) {
                current_week = Some(week);
                visit(TimelineEvent::WeekStart { date, week })?;
            }

            while holidays.get(hi).is_some_and(|h| *h == date) {
                hi += 1;
            }

            while let Some(w) = work.get(wi).filter(|w| w.date == date) {
                visit(TimelineEvent::Work(w))?;
                visited += 1;
                wi += 1;
            }

            if let Some(l) = leave.get(li).filter(|l| l.date == date) {
                visit(TimelineEvent::Leave(l))?;
                visited += 1;
                li += 1;
            }
        }

        debug!(
            work = work.len(),
            leave = leave.len(),
            holidays = holidays.len(),
            visited,
            "timeline merged"
        );
        Ok(())
    }

    /// Convenience wrapper returning all events at once.
    pub fn events(&self) -> AppResult<Vec<TimelineEvent<'a>>> {
        let mut out = Vec::new();
        self.run(|ev| {
            out.push(ev);
            Ok(())
        })?;
        Ok(out)
    }

    fn check_inputs(&self) -> AppResult<()> {
        if let Some(pair) = self.work.windows(2).find(|p| p[1].date < p[0].date) {
            return Err(AppError::Consistency(format!(
                "work records out of order: {} after {}",
                pair[1].date, pair[0].date
            )));
        }

        if let Some(pair) = self.leave.windows(2).find(|p| p[1].date <= p[0].date) {
            return Err(AppError::Consistency(format!(
                "leave records out of order or duplicated: {} after {}",
                pair[1].date, pair[0].date
            )));
        }

        if let Some(pair) = self.holidays.windows(2).find(|p| p[1] < p[0]) {
            return Err(AppError::Consistency(format!(
                "holidays out of order: {} after {}",
                pair[1], pair[0]
            )));
        }

        // Both sequences are sorted, so a shared date is found with a linear walk.
        let mut leave_iter = self.leave.iter().peekable();
        for w in self.work {
            while leave_iter.next_if(|l| l.date < w.date).is_some() {}
            if leave_iter.peek().is_some_and(|l| l.date == w.date) {
                return Err(AppError::Consistency(format!(
                    "{} holds both a work record and a leave record",
                    w.date
                )));
            }
        }

        Ok(())
    }
}
