//! Range-level leave operations on top of per-day storage.
//!
//! Every operation runs in one transaction: either all days of a range are
//! written/removed or none are, so the returned affected-month set always
//! matches what is stored.

use crate::core::range::{affected_months, range_containing, split_range};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_leave_day, has_work_on, insert_leave_day, leave_reason_on};
use crate::errors::{AppError, AppResult};
use crate::models::LeaveRange;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::BTreeSet;
use tracing::{debug, info};

pub struct LeaveLogic;

impl LeaveLogic {
    /// Writes one leave record per day of `range`.
    pub fn add(pool: &mut DbPool, range: &LeaveRange) -> AppResult<BTreeSet<NaiveDate>> {
        let tx = pool.conn.transaction()?;
        write_range(&tx, range)?;
        ttlog(&tx, "leave_add", &range_label(range), range.reason.to_db_str())?;
        tx.commit()?;

        info!(start = %range.start, end = %range.end, "leave range added");
        Ok(range.affected_months())
    }

    /// The range the leave day on `anchor` belongs to.
    pub fn range_at(pool: &DbPool, anchor: NaiveDate) -> AppResult<LeaveRange> {
        range_containing(anchor, &pool.conn)
    }

    /// Removes the whole range containing `anchor`.
    pub fn delete(
        pool: &mut DbPool,
        anchor: NaiveDate,
    ) -> AppResult<(LeaveRange, BTreeSet<NaiveDate>)> {
        let tx = pool.conn.transaction()?;
        let range = range_containing(anchor, &*tx)?;

        for day in range.days() {
            delete_leave_day(&tx, day)?;
        }
        ttlog(&tx, "leave_del", &range_label(&range), range.reason.to_db_str())?;
        tx.commit()?;

        let affected = range.affected_months();
        info!(start = %range.start, end = %range.end, months = affected.len(), "leave range deleted");
        Ok((range, affected))
    }

    /// Removes `[from, to]` out of the range containing `anchor`, splitting it if needed.
    ///
    /// Returns the ranges that remain and the months touched by the removal.
    pub fn delete_days(
        pool: &mut DbPool,
        anchor: NaiveDate,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<(Vec<LeaveRange>, BTreeSet<NaiveDate>)> {
        let tx = pool.conn.transaction()?;
        let range = range_containing(anchor, &*tx)?;
        let remaining = split_range(&range, from, to)?;

        let removed = LeaveRange::new(from, to, range.reason)?;
        for day in removed.days() {
            delete_leave_day(&tx, day)?;
        }
        ttlog(&tx, "leave_del", &range_label(&removed), range.reason.to_db_str())?;
        tx.commit()?;

        debug!(pieces = remaining.len(), "leave range split");
        Ok((remaining, removed.affected_months()))
    }

    /// Replaces the range containing `anchor` with `new_range`.
    ///
    /// Returns the old range and the months touched by either of them.
    pub fn edit(
        pool: &mut DbPool,
        anchor: NaiveDate,
        new_range: &LeaveRange,
    ) -> AppResult<(LeaveRange, BTreeSet<NaiveDate>)> {
        let tx = pool.conn.transaction()?;
        let old = range_containing(anchor, &*tx)?;

        for day in old.days() {
            delete_leave_day(&tx, day)?;
        }
        write_range(&tx, new_range)?;
        ttlog(
            &tx,
            "leave_edit",
            &range_label(&old),
            &format!("-> {} {}", range_label(new_range), new_range.reason.to_db_str()),
        )?;
        tx.commit()?;

        info!(old_start = %old.start, new_start = %new_range.start, "leave range updated");
        let affected = affected_months([&old, new_range]);
        Ok((old, affected))
    }
}

/// Inserts every day of `range`, refusing days that already hold a record of any kind.
fn write_range(conn: &Connection, range: &LeaveRange) -> AppResult<()> {
    for rec in range.records() {
        if has_work_on(conn, rec.date)? {
            return Err(AppError::DayOccupied(rec.date, "work record".into()));
        }
        if let Some(existing) = leave_reason_on(conn, rec.date)? {
            return Err(AppError::DayOccupied(
                rec.date,
                format!("leave day ({})", existing.label()),
            ));
        }
        insert_leave_day(conn, &rec)?;
    }
    Ok(())
}

fn range_label(range: &LeaveRange) -> String {
    if range.start == range.end {
        range.start.to_string()
    } else {
        format!("{}..{}", range.start, range.end)
    }
}
