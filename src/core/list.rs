use crate::core::period::PeriodData;
use crate::core::summary::Summary;
use crate::core::timeline::TimelineEvent;
use crate::db::pool::DbPool;
use crate::db::queries::load_months;
use crate::errors::AppResult;
use crate::models::{LeaveRecord, WorkRecord};
use crate::utils::date::{month_end, year_bounds};
use chrono::{Datelike, IsoWeek, NaiveDate};

/// One printable line of the monthly timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    Week(IsoWeek),
    Work(WorkRecord),
    Leave(LeaveRecord),
}

#[derive(Debug, Clone)]
pub struct MonthView {
    pub month: NaiveDate,
    pub lines: Vec<ViewLine>,
    pub summary: Summary,
}

pub struct ListLogic;

impl ListLogic {
    /// Timeline and totals of a single month.
    pub fn month_view(pool: &DbPool, month: NaiveDate) -> AppResult<MonthView> {
        let mut year_summary = Summary::new();
        build_month(pool, month, &mut year_summary)
    }

    /// Every month of `year` that holds records, plus the year totals.
    ///
    /// Month and year totals are filled from the same merge pass.
    pub fn year_views(pool: &DbPool, year: i32) -> AppResult<(Vec<MonthView>, Summary)> {
        let (first, last) = year_bounds(year)?;
        let mut year_summary = Summary::new();
        let mut views = Vec::new();

        for month in load_months(&pool.conn)?
            .into_iter()
            .filter(|m| *m >= first && *m <= last)
        {
            views.push(build_month(pool, month, &mut year_summary)?);
        }

        Ok((views, year_summary))
    }

    pub fn months(pool: &DbPool) -> AppResult<Vec<NaiveDate>> {
        load_months(&pool.conn)
    }
}

fn build_month(pool: &DbPool, month: NaiveDate, year_summary: &mut Summary) -> AppResult<MonthView> {
    let first = month.with_day(1).unwrap_or(month);
    let data = PeriodData::load(&pool.conn, first, month_end(first))?;

    let mut summary = Summary::new();
    let mut lines = Vec::new();

    data.merger().run(|ev| {
        summary.observe(&ev);
        year_summary.observe(&ev);
        lines.push(match ev {
            TimelineEvent::WeekStart { week, .. } => ViewLine::Week(week),
            TimelineEvent::Work(w) => ViewLine::Work(w.clone()),
            TimelineEvent::Leave(l) => ViewLine::Leave(*l),
        });
        Ok(())
    })?;

    Ok(MonthView {
        month: first,
        lines,
        summary,
    })
}
