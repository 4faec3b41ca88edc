pub mod config;
pub mod export;
pub mod holiday;
pub mod init;
pub mod leave;
pub mod list;
pub mod log;
pub mod work;

use crate::core::list::ListLogic;
use crate::core::selection::{months_to_refresh, select_month};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::date::{month_start, today};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub(crate) fn format_months(months: &BTreeSet<NaiveDate>) -> String {
    months
        .iter()
        .map(|m| m.format("%Y-%m").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints which months changed and which month the listing would now open on.
pub(crate) fn report_change(pool: &DbPool, affected: &BTreeSet<NaiveDate>) -> AppResult<()> {
    info(format!("Affected months: {}", format_months(affected)));

    let months = ListLogic::months(pool)?;
    let now = today();
    let current = month_start(now);

    if !months_to_refresh(&[current], affected).is_empty() {
        info("The current month has changed.");
    }

    match select_month(&months, Some(current), affected, now) {
        Some(m) => info(format!("Showing: {}", m.format("%Y-%m"))),
        None => info("No records left."),
    }
    Ok(())
}
