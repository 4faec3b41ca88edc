// src/export/logic.rs

use crate::core::period::PeriodData;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_months;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::grid::Grid;
use crate::export::range::parse_years;
use crate::export::sheet::SheetExporter;
use crate::export::xlsx::save_workbook;
use crate::ui::messages::warning;
use crate::utils::date::{month_end, today, year_bounds};
use crate::utils::path::{expand_tilde, has_extension};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::info;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Writes a workbook with one sheet per year.
    ///
    /// - `file`: output path, must end in `.xlsx` (`~/` is expanded)
    /// - `range`: `None` (every year holding records), `YYYY` or `YYYY:YYYY`
    /// - `force`: overwrite an existing file without asking
    pub fn export(
        pool: &DbPool,
        file: &str,
        range: Option<&str>,
        force: bool,
        week_label: &str,
    ) -> AppResult<PathBuf> {
        let path = expand_tilde(file);

        if !has_extension(&path, "xlsx") {
            return Err(AppError::Export(format!(
                "output file must have the .xlsx extension: {}",
                path.display()
            )));
        }

        ensure_writable(&path, force)?;

        let years = match range {
            Some(r) if !r.eq_ignore_ascii_case("all") => parse_years(r)?,
            _ => years_with_data(&pool.conn)?,
        };

        let years = if years.is_empty() {
            warning("No records found, exporting an empty sheet for the current year.");
            vec![today().year()]
        } else {
            years
        };

        let grids = years
            .iter()
            .map(|y| build_year_grid(&pool.conn, *y, week_label))
            .collect::<AppResult<Vec<_>>>()?;

        save_workbook(&grids, &path)?;

        ttlog(
            &pool.conn,
            "export",
            &path.display().to_string(),
            &format!("{} sheet(s)", grids.len()),
        )?;
        info!(path = %path.display(), sheets = grids.len(), "workbook exported");

        Ok(path)
    }
}

/// Builds the sheet of one year: every month holding records, then the year summary.
pub fn build_year_grid(conn: &Connection, year: i32, week_label: &str) -> AppResult<Grid> {
    let (first, last) = year_bounds(year)?;
    let mut exporter = SheetExporter::new(year.to_string(), week_label)?;

    for month in months_in(conn, first, last)? {
        let data = PeriodData::load(conn, month, month_end(month))?;
        exporter.write_month(month, &data)?;
    }

    exporter.finish()
}

fn months_in(conn: &Connection, first: NaiveDate, last: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    Ok(load_months(conn)?
        .into_iter()
        .filter(|m| *m >= first && *m <= last)
        .collect())
}

fn years_with_data(conn: &Connection) -> AppResult<Vec<i32>> {
    let mut years: Vec<i32> = load_months(conn)?.iter().map(|m| m.year()).collect();
    years.dedup();
    Ok(years)
}
