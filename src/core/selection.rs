//! Which month to show after the data changed.

use crate::utils::date::month_start;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Picks the month to display once `months` (ascending first-of-month values)
/// has been reloaded after a mutation that touched `affected`.
///
/// Order of preference:
/// 1. `current`, if it is still available
/// 2. the earliest affected month that is available
/// 3. the month containing `today`, if available
/// 4. the first available month
pub fn select_month(
    months: &[NaiveDate],
    current: Option<NaiveDate>,
    affected: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if let Some(cur) = current
        && months.contains(&cur)
    {
        return Some(cur);
    }

    if let Some(first_affected) = affected.iter().find(|m| months.contains(m)) {
        return Some(*first_affected);
    }

    let this_month = month_start(today);
    if months.contains(&this_month) {
        return Some(this_month);
    }

    months.first().copied()
}

/// Months currently on screen that must be re-rendered.
pub fn months_to_refresh(visible: &[NaiveDate], affected: &BTreeSet<NaiveDate>) -> Vec<NaiveDate> {
    visible
        .iter()
        .filter(|m| affected.contains(m))
        .copied()
        .collect()
}
