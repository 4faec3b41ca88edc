use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::debug;

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Worked intervals; several per day are allowed.
fn create_work_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS work_records (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            CHECK (end_time >= start_time)
        );

        CREATE INDEX IF NOT EXISTS idx_work_records_date_start ON work_records(date, start_time);
        "#,
    )?;
    Ok(())
}

/// Leave days; the primary key enforces one record per day.
fn create_leave_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS leave_records (
            date    TEXT PRIMARY KEY,
            reason  TEXT NOT NULL CHECK(reason IN ('vacation','sick','other'))
        );
        "#,
    )?;
    Ok(())
}

fn create_holidays_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS holidays (
            date  TEXT PRIMARY KEY,
            name  TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Early databases stored holidays as bare dates.
fn migrate_add_name_to_holidays(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "holidays")? || table_has_column(conn, "holidays", "name")? {
        return Ok(());
    }

    warning("Adding 'name' column to holidays table...");
    conn.execute_batch("ALTER TABLE holidays ADD COLUMN name TEXT NOT NULL DEFAULT '';")?;
    success("'name' column added.");
    Ok(())
}

/// Bring the schema up to date. Safe to run on every open.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let steps: [(&str, fn(&Connection) -> Result<()>); 5] = [
        ("log", ensure_log_table),
        ("work_records", create_work_records_table),
        ("leave_records", create_leave_records_table),
        ("holidays.name", migrate_add_name_to_holidays),
        ("holidays", create_holidays_table),
    ];

    for (name, step) in steps {
        step(conn).map_err(|e| AppError::Migration(format!("{name}: {e}")))?;
        debug!(step = name, "migration step applied");
    }

    Ok(())
}
