use crate::cli::commands::report_change;
use crate::cli::parser::{Commands, HolidayAction};
use crate::config::Config;
use crate::core::holiday::HolidayLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Holiday;
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_date, today};
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Holiday { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        HolidayAction::Add { date, name } => {
            let holiday = Holiday::new(parse_date(date)?, name.as_str());
            let affected = HolidayLogic::add(&mut pool, &holiday)?;
            success(format!("Holiday added: {}", holiday.date));
            report_change(&pool, &affected)?;
        }

        HolidayAction::Del { date } => {
            let d = parse_date(date)?;
            let affected = HolidayLogic::delete(&mut pool, d)?;
            success(format!("Holiday on {d} has been deleted."));
            report_change(&pool, &affected)?;
        }

        HolidayAction::List { year } => {
            let y = year.unwrap_or_else(|| today().year());
            let holidays = HolidayLogic::list(&pool, y)?;

            if holidays.is_empty() {
                info(format!("No holidays in {y}."));
            }
            for h in holidays {
                println!("{} {:<9} {}", h.date, h.date.format("%A"), h.name);
            }
        }
    }

    Ok(())
}
