// src/export/sheet.rs

use crate::core::period::PeriodData;
use crate::core::summary::Summary;
use crate::core::timeline::TimelineEvent;
use crate::errors::AppResult;
use crate::export::grid::{Grid, Rule};
use crate::models::LeaveReason;
use crate::utils::formatting::secs2readable;
use chrono::NaiveDate;
use tracing::debug;

pub const COL_MONTH: u16 = 0;
pub const COL_WEEK: u16 = 1;
pub const COL_DATE: u16 = 2;
pub const COL_DAY: u16 = 3;
pub const COL_START_TIME: u16 = 4;
pub const COL_END_TIME: u16 = 5;
pub const COL_DURATION: u16 = 6;
pub const COL_LEAVE: u16 = 7;

pub const COL_SUM_NAME: u16 = 8;
pub const COL_SUM_DAY: u16 = 9;
pub const COL_SUM_DURATION: u16 = 10;
pub const COL_SUM_LEAVE_BASE: u16 = 11;

/// One past the last used column.
pub const COL_COUNT: u16 = COL_SUM_LEAVE_BASE + LeaveReason::ALL.len() as u16;

const COLUMN_WIDTH: f64 = 14.0;
const WEEK_COLUMN_WIDTH: f64 = 16.0;
const ROW_HEIGHT: f64 = 15.0;

/// Writes one year of months into a [`Grid`]: data rows, month summaries
/// overlaid on each month's last row, and a trailing year summary.
pub struct SheetExporter {
    grid: Grid,
    week_label: String,
    row_cursor: u32,
    month_start_rows: Vec<u32>,
    week_start_rows: Vec<u32>,
    year_summary: Summary,
}

impl SheetExporter {
    pub fn new(name: impl Into<String>, week_label: impl Into<String>) -> AppResult<Self> {
        let mut exporter = Self {
            grid: Grid::new(name),
            week_label: week_label.into(),
            row_cursor: 0,
            month_start_rows: Vec::new(),
            week_start_rows: Vec::new(),
            year_summary: Summary::new(),
        };
        exporter.write_headers()?;
        Ok(exporter)
    }

    fn write_headers(&mut self) -> AppResult<()> {
        let row = self.row_cursor;
        self.grid.write_label(row, COL_MONTH, "Month")?;
        self.grid.write_label(row, COL_WEEK, "Week")?;
        self.grid.write_label(row, COL_DATE, "Date")?;
        self.grid.write_label(row, COL_DAY, "Weekday")?;
        self.grid.write_label(row, COL_START_TIME, "Start")?;
        self.grid.write_label(row, COL_END_TIME, "End")?;
        self.grid.write_label(row, COL_DURATION, "Duration")?;
        self.grid.write_label(row, COL_LEAVE, "Leave reason")?;

        self.write_summary_headers()?;
        self.row_cursor += 1;
        Ok(())
    }

    fn write_summary_headers(&mut self) -> AppResult<()> {
        let row = self.row_cursor;
        self.grid.write_label(row, COL_SUM_NAME, "Summary")?;
        self.grid.write_label(row, COL_SUM_DAY, "Sum. days")?;
        self.grid.write_label(row, COL_SUM_DURATION, "Sum. duration")?;

        for (col, reason) in (COL_SUM_LEAVE_BASE..).zip(LeaveReason::ALL) {
            self.grid
                .write_label(row, col, format!("Sum. {}", reason.label()))?;
        }
        Ok(())
    }

    /// Appends the rows of one month and returns that month's totals.
    pub fn write_month(&mut self, month: NaiveDate, data: &PeriodData) -> AppResult<Summary> {
        let month_name = month.format("%B %Y").to_string();
        let start_row = self.row_cursor;
        self.grid.write_label(start_row, COL_MONTH, &month_name)?;

        let mut month_summary = Summary::new();

        let Self {
            grid,
            week_label,
            row_cursor,
            week_start_rows,
            year_summary,
            ..
        } = self;

        data.merger().run(|ev| {
            let row = *row_cursor;
            match ev {
                TimelineEvent::WeekStart { week, .. } => {
                    grid.write_label(row, COL_WEEK, format!("{} {}", week_label, week.week()))?;
                    week_start_rows.push(row);
                }
                TimelineEvent::Work(w) => {
                    grid.write_label(row, COL_DATE, w.date.format("%Y-%m-%d").to_string())?;
                    grid.write_label(row, COL_DAY, w.date.format("%A").to_string())?;
                    grid.write_label(row, COL_START_TIME, w.start_str())?;
                    grid.write_label(row, COL_END_TIME, w.end_str())?;
                    grid.write_label(row, COL_DURATION, secs2readable(w.duration_seconds(), true))?;
                    *row_cursor += 1;
                }
                TimelineEvent::Leave(l) => {
                    grid.write_label(row, COL_DATE, l.date.format("%Y-%m-%d").to_string())?;
                    grid.write_label(row, COL_DAY, l.date.format("%A").to_string())?;
                    grid.write_label(row, COL_LEAVE, l.reason.label())?;
                    *row_cursor += 1;
                }
            }
            month_summary.observe(&ev);
            year_summary.observe(&ev);
            Ok(())
        })?;

        self.month_start_rows.push(start_row);

        // Overlay on the month's last data row; an empty month keeps its own row.
        let summary_row = if month_summary.added_count == 0 {
            self.row_cursor += 1;
            start_row
        } else {
            start_row + month_summary.added_count - 1
        };
        self.write_summary(&month_summary, &month_name, summary_row)?;

        debug!(month = %month_name, rows = month_summary.added_count, "month written");
        Ok(month_summary)
    }

    fn write_summary(&mut self, summary: &Summary, name: &str, row: u32) -> AppResult<()> {
        self.grid.write_label(row, COL_SUM_NAME, name)?;
        self.grid
            .write_label(row, COL_SUM_DAY, summary.worked_days.to_string())?;
        self.grid.write_label(
            row,
            COL_SUM_DURATION,
            secs2readable(summary.total_worked_seconds, true),
        )?;

        for (col, reason) in (COL_SUM_LEAVE_BASE..).zip(LeaveReason::ALL) {
            self.grid
                .write_label(row, col, summary.leave_count(reason).to_string())?;
        }
        Ok(())
    }

    /// Writes the year summary block and the fixed layout, then hands the grid over.
    pub fn finish(mut self) -> AppResult<Grid> {
        self.row_cursor += 2;
        self.write_summary_headers()?;
        self.row_cursor += 1;

        let year_name = format!("Year {}", self.grid.name());
        let year_summary = self.year_summary.clone();
        self.write_summary(&year_summary, &year_name, self.row_cursor)?;

        self.grid.freeze_rows(1);

        for col in [COL_MONTH, COL_LEAVE, COL_SUM_NAME] {
            self.grid.set_column_width(col, COLUMN_WIDTH)?;
        }
        self.grid.set_column_width(COL_WEEK, WEEK_COLUMN_WIDTH)?;
        for col in COL_SUM_DAY..COL_COUNT {
            self.grid.set_column_width(col, COLUMN_WIDTH)?;
        }

        for row in 0..=self.row_cursor {
            self.grid.set_row_height(row, ROW_HEIGHT)?;
        }

        // A week starting on a month's first row only gets the month line.
        for row in &self.week_start_rows {
            if self.month_start_rows.contains(row) {
                continue;
            }
            for col in COL_WEEK..=COL_LEAVE {
                self.grid.set_rule(*row, col, Rule::Week)?;
            }
        }

        for row in &self.month_start_rows {
            for col in 0..COL_COUNT {
                self.grid.set_rule(*row, col, Rule::Month)?;
            }
        }

        Ok(self.grid)
    }
}
