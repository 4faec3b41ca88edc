// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::grid::{Grid, Rule};
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::collections::BTreeSet;
use std::path::Path;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn rule_format(rule: Rule) -> Format {
    match rule {
        Rule::Week => Format::new()
            .set_border_top(FormatBorder::Hair)
            .set_border_top_color(Color::RGB(0x808080)),
        Rule::Month => Format::new()
            .set_border_top(FormatBorder::Thin)
            .set_border_top_color(Color::RGB(0x333333)),
    }
}

/// Copies a grid into a worksheet: cells, border markers, frozen header and fixed sizes.
///
/// Any failing write aborts the render.
pub(crate) fn render_grid(grid: &Grid, worksheet: &mut Worksheet) -> AppResult<()> {
    worksheet.set_name(grid.name())?;

    let header = header_format();
    let week = rule_format(Rule::Week);
    let month = rule_format(Rule::Month);
    let format_for = |rule: Rule| match rule {
        Rule::Week => &week,
        Rule::Month => &month,
    };

    for ((row, col), text) in grid.cells() {
        if row == 0 {
            worksheet.write_string_with_format(row, col, text, &header)?;
        } else if let Some(rule) = grid.rule(row, col) {
            worksheet.write_string_with_format(row, col, text, format_for(rule))?;
        } else {
            worksheet.write_string(row, col, text)?;
        }
    }

    // Border markers on cells that hold no text still need a (blank) cell.
    let written: BTreeSet<(u32, u16)> = grid.cells().map(|(pos, _)| pos).collect();
    for ((row, col), rule) in grid.rules() {
        if !written.contains(&(row, col)) {
            worksheet.write_blank(row, col, format_for(rule))?;
        }
    }

    if grid.frozen_rows() > 0 {
        worksheet.set_freeze_panes(grid.frozen_rows(), 0)?;
    }

    for (col, width) in grid.column_widths() {
        worksheet.set_column_width(col, width)?;
    }

    for (row, height) in grid.row_heights() {
        worksheet.set_row_height(row, height)?;
    }

    Ok(())
}

/// Renders every grid as one sheet and saves the workbook.
///
/// Nothing is written to disk unless all sheets rendered.
pub(crate) fn save_workbook(grids: &[Grid], path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();

    for grid in grids {
        let worksheet = workbook.add_worksheet();
        render_grid(grid, worksheet)?;
    }

    workbook.save(path)?;
    Ok(())
}
