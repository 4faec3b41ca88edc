use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_work_record, insert_work_record, leave_reason_on, load_work_record, update_work_record,
};
use crate::errors::{AppError, AppResult};
use crate::models::WorkRecord;
use crate::utils::date::month_start;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use std::collections::BTreeSet;
use tracing::info;

pub struct WorkLogic;

impl WorkLogic {
    /// Stores a new interval. Returns the stored record and the months it touched.
    pub fn add(
        pool: &mut DbPool,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<(WorkRecord, BTreeSet<NaiveDate>)> {
        let mut rec = WorkRecord::new(0, date, start, end)?;

        let tx = pool.conn.transaction()?;
        ensure_no_leave(&tx, date)?;
        rec.id = insert_work_record(&tx, &rec)?;
        ttlog(
            &tx,
            "work_add",
            &date.to_string(),
            &format!("#{} {}-{}", rec.id, rec.start_str(), rec.end_str()),
        )?;
        tx.commit()?;

        info!(id = rec.id, %date, "work record added");
        Ok((rec, BTreeSet::from([month_start(date)])))
    }

    /// Changes date and/or times of an existing interval. Unset fields keep their value.
    pub fn edit(
        pool: &mut DbPool,
        id: i64,
        date: Option<NaiveDate>,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    ) -> AppResult<(WorkRecord, BTreeSet<NaiveDate>)> {
        let tx = pool.conn.transaction()?;

        let old = load_work_record(&tx, id)?
            .ok_or_else(|| AppError::RecordNotFound(format!("work record #{id}")))?;

        let updated = WorkRecord::new(
            id,
            date.unwrap_or(old.date),
            start.unwrap_or(old.start),
            end.unwrap_or(old.end),
        )?;

        if updated.date != old.date {
            ensure_no_leave(&tx, updated.date)?;
        }

        update_work_record(&tx, &updated)?;
        ttlog(
            &tx,
            "work_edit",
            &updated.date.to_string(),
            &format!(
                "#{id} {} {}-{} -> {} {}-{}",
                old.date,
                old.start_str(),
                old.end_str(),
                updated.date,
                updated.start_str(),
                updated.end_str()
            ),
        )?;
        tx.commit()?;

        info!(id, "work record updated");
        let affected = BTreeSet::from([month_start(old.date), month_start(updated.date)]);
        Ok((updated, affected))
    }

    /// Removes an interval. Returns the removed record so callers can report what was deleted.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<(WorkRecord, BTreeSet<NaiveDate>)> {
        let tx = pool.conn.transaction()?;

        let old = load_work_record(&tx, id)?
            .ok_or_else(|| AppError::RecordNotFound(format!("work record #{id}")))?;

        delete_work_record(&tx, id)?;
        ttlog(&tx, "work_del", &old.date.to_string(), &format!("#{id}"))?;
        tx.commit()?;

        info!(id, "work record deleted");
        let affected = BTreeSet::from([month_start(old.date)]);
        Ok((old, affected))
    }
}

fn ensure_no_leave(conn: &Connection, date: NaiveDate) -> AppResult<()> {
    if let Some(reason) = leave_reason_on(conn, date)? {
        return Err(AppError::DayOccupied(
            date,
            format!("leave day ({})", reason.label()),
        ));
    }
    Ok(())
}
