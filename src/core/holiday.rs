use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_holiday, load_holidays_between, upsert_holiday};
use crate::errors::AppResult;
use crate::models::Holiday;
use crate::utils::date::{month_start, year_bounds};
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub struct HolidayLogic;

impl HolidayLogic {
    pub fn add(pool: &mut DbPool, holiday: &Holiday) -> AppResult<BTreeSet<NaiveDate>> {
        upsert_holiday(&pool.conn, holiday)?;
        ttlog(&pool.conn, "holiday_add", &holiday.date.to_string(), &holiday.name)?;
        Ok(BTreeSet::from([month_start(holiday.date)]))
    }

    pub fn delete(pool: &mut DbPool, date: NaiveDate) -> AppResult<BTreeSet<NaiveDate>> {
        delete_holiday(&pool.conn, date)?;
        ttlog(&pool.conn, "holiday_del", &date.to_string(), "")?;
        Ok(BTreeSet::from([month_start(date)]))
    }

    pub fn list(pool: &DbPool, year: i32) -> AppResult<Vec<Holiday>> {
        let (first, last) = year_bounds(year)?;
        load_holidays_between(&pool.conn, first, last)
    }
}
