// src/export/mod.rs

mod fs_utils;
pub mod grid;
pub mod logic;
mod range;
pub mod sheet;
mod xlsx;

pub use grid::{Grid, Rule};
pub use logic::{ExportLogic, build_year_grid};
pub use sheet::SheetExporter;

use crate::ui::messages::success;
use std::path::Path;

/// Completion message shared by the CLI export paths.
pub(crate) fn notify_export_success(path: &Path) {
    success(format!("XLSX export completed: {}", path.display()));
}
