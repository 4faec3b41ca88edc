use chrono::NaiveDate;
use serde::Serialize;

/// A non-working calendar day. Only used for week bookkeeping; never rendered as a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: NaiveDate, // ⇔ holidays.date (TEXT "YYYY-MM-DD", PK)
    pub name: String,    // ⇔ holidays.name (TEXT, default '')
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}
