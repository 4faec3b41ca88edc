//! Reconstruction of multi-day leave ranges from per-day leave records.
//!
//! Leave is stored one calendar day at a time. A range is recovered on
//! demand by walking outwards from an anchor day while the neighbouring
//! day holds a leave record with the identical reason. Any other day
//! (no record, a different reason, a weekend or holiday without a record)
//! ends the walk.

use crate::errors::{AppError, AppResult};
use crate::models::{LeaveRange, LeaveReason};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Answers "which leave reason, if any, is stored on this date?".
pub trait ReasonSource {
    fn reason_on(&self, date: NaiveDate) -> AppResult<Option<LeaveReason>>;
}

impl ReasonSource for BTreeMap<NaiveDate, LeaveReason> {
    fn reason_on(&self, date: NaiveDate) -> AppResult<Option<LeaveReason>> {
        Ok(self.get(&date).copied())
    }
}

impl<T: ReasonSource + ?Sized> ReasonSource for &T {
    fn reason_on(&self, date: NaiveDate) -> AppResult<Option<LeaveReason>> {
        (**self).reason_on(date)
    }
}

/// Maximal range of same-reason leave days containing `anchor`.
///
/// Fails with [`AppError::NoLeaveRecord`] if `anchor` itself has no leave record.
pub fn range_containing<S: ReasonSource + ?Sized>(
    anchor: NaiveDate,
    source: &S,
) -> AppResult<LeaveRange> {
    let reason = source
        .reason_on(anchor)?
        .ok_or(AppError::NoLeaveRecord(anchor))?;

    let mut start = anchor;
    while let Some(prev) = start.pred_opt() {
        if source.reason_on(prev)? != Some(reason) {
            break;
        }
        start = prev;
    }

    let mut end = anchor;
    while let Some(next) = end.succ_opt() {
        if source.reason_on(next)? != Some(reason) {
            break;
        }
        end = next;
    }

    debug!(%anchor, %start, %end, reason = reason.to_db_str(), "reconstructed leave range");

    LeaveRange::new(start, end, reason)
}

/// Pieces of `range` left over once `[removed_start, removed_end]` is taken out.
///
/// Returns zero, one or two ranges, all with the reason of `range`.
pub fn split_range(
    range: &LeaveRange,
    removed_start: NaiveDate,
    removed_end: NaiveDate,
) -> AppResult<Vec<LeaveRange>> {
    if removed_end < removed_start {
        return Err(AppError::InvalidInterval(format!(
            "removed days end ({removed_end}) before they start ({removed_start})"
        )));
    }
    if !range.contains(removed_start) || !range.contains(removed_end) {
        return Err(AppError::InvalidInterval(format!(
            "{removed_start}..{removed_end} is not inside leave range {}..{}",
            range.start, range.end
        )));
    }

    let mut pieces = Vec::with_capacity(2);

    if removed_start > range.start
        && let Some(before_end) = removed_start.pred_opt()
    {
        pieces.push(LeaveRange::new(range.start, before_end, range.reason)?);
    }

    if removed_end < range.end
        && let Some(after_start) = removed_end.succ_opt()
    {
        pieces.push(LeaveRange::new(after_start, range.end, range.reason)?);
    }

    Ok(pieces)
}

/// Union of the months touched by several ranges.
pub fn affected_months<'a, I>(ranges: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = &'a LeaveRange>,
{
    ranges
        .into_iter()
        .flat_map(|r| r.affected_months())
        .collect()
}
