// src/export/grid.rs

use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;

/// Spreadsheet limits (xlsx).
pub const MAX_ROWS: u32 = 1_048_576;
pub const MAX_COLS: u16 = 16_384;

/// Top-border marker applied to a cell after all rows are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Light line above the first row of a week.
    Week,
    /// Heavier line above the first row of a month.
    Month,
}

/// In-memory sheet: text cells, border markers and fixed layout settings.
///
/// Exporters fill a grid first and hand it to a renderer as a whole, so a
/// failure part-way through never leaves a half-written document behind.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    name: String,
    cells: BTreeMap<(u32, u16), String>,
    rules: BTreeMap<(u32, u16), Rule>,
    column_widths: BTreeMap<u16, f64>,
    row_heights: BTreeMap<u32, f64>,
    frozen_rows: u32,
}

impl Grid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes (or overwrites) a text cell.
    pub fn write_label(&mut self, row: u32, col: u16, text: impl Into<String>) -> AppResult<()> {
        check_bounds(row, col)?;
        self.cells.insert((row, col), text.into());
        Ok(())
    }

    pub fn set_rule(&mut self, row: u32, col: u16, rule: Rule) -> AppResult<()> {
        check_bounds(row, col)?;
        self.rules.insert((row, col), rule);
        Ok(())
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) -> AppResult<()> {
        check_bounds(0, col)?;
        self.column_widths.insert(col, width);
        Ok(())
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) -> AppResult<()> {
        check_bounds(row, 0)?;
        self.row_heights.insert(row, height);
        Ok(())
    }

    pub fn freeze_rows(&mut self, rows: u32) {
        self.frozen_rows = rows;
    }

    pub fn frozen_rows(&self) -> u32 {
        self.frozen_rows
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&str> {
        self.cells.get(&(row, col)).map(String::as_str)
    }

    pub fn rule(&self, row: u32, col: u16) -> Option<Rule> {
        self.rules.get(&(row, col)).copied()
    }

    /// Text of a whole row, blank cells as empty strings, up to `width` columns.
    pub fn row_text(&self, row: u32, width: u16) -> Vec<String> {
        (0..width)
            .map(|c| self.cell(row, c).unwrap_or_default().to_string())
            .collect()
    }

    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &str)> {
        self.cells.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn rules(&self) -> impl Iterator<Item = ((u32, u16), Rule)> {
        self.rules.iter().map(|(k, v)| (*k, *v))
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> {
        self.column_widths.iter().map(|(k, v)| (*k, *v))
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> {
        self.row_heights.iter().map(|(k, v)| (*k, *v))
    }

    /// Index of the last row holding text, if any.
    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().map(|(r, _)| *r).max()
    }

    /// Rows carrying the given rule in at least one column, ascending.
    pub fn rows_with_rule(&self, rule: Rule) -> Vec<u32> {
        let mut rows: Vec<u32> = self
            .rules
            .iter()
            .filter(|(_, r)| **r == rule)
            .map(|((row, _), _)| *row)
            .collect();
        rows.dedup();
        rows
    }
}

fn check_bounds(row: u32, col: u16) -> AppResult<()> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(AppError::Export(format!(
            "cell ({row}, {col}) is outside the sheet limits"
        )));
    }
    Ok(())
}
