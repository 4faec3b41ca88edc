use crate::core::timeline::TimelineEvent;
use crate::models::{LeaveReason, LeaveRecord, WorkRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Running totals for one scope (a month or a year).
///
/// Built fresh per scope and fed by the timeline merge; there is no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub worked_days: u32,
    pub total_worked_seconds: i64,
    pub leave_counts: BTreeMap<LeaveReason, u32>,
    /// Rows contributed so far. Places the overlaid summary row in exports.
    pub added_count: u32,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_work(&mut self, record: &WorkRecord) {
        self.worked_days += 1;
        self.total_worked_seconds += record.duration_seconds();
        self.added_count += 1;
    }

    pub fn add_leave(&mut self, record: &LeaveRecord) {
        *self.leave_counts.entry(record.reason).or_insert(0) += 1;
        self.added_count += 1;
    }

    /// Folds one merger event in. Week boundaries carry no totals.
    pub fn observe(&mut self, event: &TimelineEvent<'_>) {
        match event {
            TimelineEvent::Work(w) => self.add_work(w),
            TimelineEvent::Leave(l) => self.add_leave(l),
            TimelineEvent::WeekStart { .. } => {}
        }
    }

    pub fn leave_count(&self, reason: LeaveReason) -> u32 {
        self.leave_counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_leave_days(&self) -> u32 {
        self.leave_counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.added_count == 0
    }
}
