use crate::core::range::ReasonSource;
use crate::errors::{AppError, AppResult};
use crate::models::{Holiday, LeaveReason, LeaveRecord, WorkRecord};
use crate::utils::date::month_start;
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M";

fn date_str(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_col(row: &Row, col: &str) -> Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| conversion_error(0, AppError::InvalidDate(s)))
}

fn parse_time_col(row: &Row, col: &str) -> Result<NaiveTime> {
    let s: String = row.get(col)?;
    NaiveTime::parse_from_str(&s, TIME_FMT).map_err(|_| conversion_error(0, AppError::InvalidTime(s)))
}

pub fn map_work_row(row: &Row) -> Result<WorkRecord> {
    Ok(WorkRecord {
        id: row.get("id")?,
        date: parse_date_col(row, "date")?,
        start: parse_time_col(row, "start_time")?,
        end: parse_time_col(row, "end_time")?,
    })
}

pub fn map_leave_row(row: &Row) -> Result<LeaveRecord> {
    let reason_str: String = row.get("reason")?;
    let reason = LeaveReason::from_db_str(&reason_str)
        .ok_or_else(|| conversion_error(1, AppError::InvalidReason(reason_str.clone())))?;

    Ok(LeaveRecord {
        date: parse_date_col(row, "date")?,
        reason,
    })
}

fn map_holiday_row(row: &Row) -> Result<Holiday> {
    Ok(Holiday {
        date: parse_date_col(row, "date")?,
        name: row.get("name")?,
    })
}

// ---------------------------
// Work records
// ---------------------------

/// Inserts a record and returns its new id.
pub fn insert_work_record(conn: &Connection, rec: &WorkRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_records (date, start_time, end_time, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            date_str(rec.date),
            rec.start_str(),
            rec.end_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_work_record(conn: &Connection, rec: &WorkRecord) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE work_records
         SET date = ?1, start_time = ?2, end_time = ?3
         WHERE id = ?4",
        params![date_str(rec.date), rec.start_str(), rec.end_str(), rec.id],
    )?;

    if changed == 0 {
        return Err(AppError::RecordNotFound(format!("work record #{}", rec.id)));
    }
    Ok(())
}

pub fn delete_work_record(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM work_records WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::RecordNotFound(format!("work record #{id}")));
    }
    Ok(())
}

pub fn load_work_record(conn: &Connection, id: i64) -> AppResult<Option<WorkRecord>> {
    let rec = conn
        .query_row(
            "SELECT id, date, start_time, end_time FROM work_records WHERE id = ?1",
            [id],
            map_work_row,
        )
        .optional()?;
    Ok(rec)
}

/// Work records in `[start, end]`, sorted by date then start time.
pub fn load_work_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<WorkRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, start_time, end_time
         FROM work_records
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, start_time ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![date_str(start), date_str(end)], map_work_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn has_work_on(conn: &Connection, date: NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM work_records WHERE date = ?1 LIMIT 1")?;
    Ok(stmt.exists([date_str(date)])?)
}

// ---------------------------
// Leave records
// ---------------------------

pub fn insert_leave_day(conn: &Connection, rec: &LeaveRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO leave_records (date, reason) VALUES (?1, ?2)",
        params![date_str(rec.date), rec.reason.to_db_str()],
    )?;
    Ok(())
}

pub fn delete_leave_day(conn: &Connection, date: NaiveDate) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM leave_records WHERE date = ?1", [date_str(date)])?;
    if changed == 0 {
        return Err(AppError::NoLeaveRecord(date));
    }
    Ok(())
}

pub fn leave_reason_on(conn: &Connection, date: NaiveDate) -> AppResult<Option<LeaveReason>> {
    let mut stmt = conn.prepare_cached("SELECT date, reason FROM leave_records WHERE date = ?1")?;
    let rec = stmt.query_row([date_str(date)], map_leave_row).optional()?;
    Ok(rec.map(|r| r.reason))
}

/// Leave records in `[start, end]`, sorted by date.
pub fn load_leave_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<LeaveRecord>> {
    let mut stmt = conn.prepare(
        "SELECT date, reason
         FROM leave_records
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(params![date_str(start), date_str(end)], map_leave_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

impl ReasonSource for Connection {
    fn reason_on(&self, date: NaiveDate) -> AppResult<Option<LeaveReason>> {
        leave_reason_on(self, date)
    }
}

// ---------------------------
// Holidays
// ---------------------------

/// Inserts or renames a holiday.
pub fn upsert_holiday(conn: &Connection, holiday: &Holiday) -> AppResult<()> {
    conn.execute(
        "INSERT INTO holidays (date, name) VALUES (?1, ?2)
         ON CONFLICT(date) DO UPDATE SET name = excluded.name",
        params![date_str(holiday.date), holiday.name],
    )?;
    Ok(())
}

pub fn delete_holiday(conn: &Connection, date: NaiveDate) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM holidays WHERE date = ?1", [date_str(date)])?;
    if changed == 0 {
        return Err(AppError::RecordNotFound(format!("holiday on {date}")));
    }
    Ok(())
}

/// Holidays in `[start, end]`, sorted by date.
pub fn load_holidays_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<Holiday>> {
    let mut stmt = conn.prepare(
        "SELECT date, name
         FROM holidays
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(params![date_str(start), date_str(end)], map_holiday_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Months / years
// ---------------------------

/// First-of-month values that hold at least one work or leave record, ascending.
pub fn load_months(conn: &Connection) -> AppResult<Vec<NaiveDate>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT substr(date, 1, 7) AS month FROM (
             SELECT date FROM work_records
             UNION
             SELECT date FROM leave_records
         )
         ORDER BY month ASC",
    )?;

    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        let m = r?;
        let first = NaiveDate::parse_from_str(&format!("{m}-01"), DATE_FMT)
            .map_err(|_| AppError::InvalidDate(m.clone()))?;
        out.push(month_start(first));
    }
    Ok(out)
}
