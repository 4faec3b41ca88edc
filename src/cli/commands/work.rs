use crate::cli::commands::{ask_confirmation, report_change};
use crate::cli::parser::{Commands, WorkAction};
use crate::config::Config;
use crate::core::work::WorkLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::secs2readable;
use crate::utils::time::{parse_optional_time, parse_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Work { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        WorkAction::Add { date, start, end } => {
            let d = parse_date(date)?;
            let (rec, affected) = WorkLogic::add(&mut pool, d, parse_time(start)?, parse_time(end)?)?;
            success(format!(
                "Work record #{} added: {} {}-{} ({})",
                rec.id,
                rec.date,
                rec.start_str(),
                rec.end_str(),
                secs2readable(rec.duration_seconds(), true)
            ));
            report_change(&pool, &affected)?;
        }

        WorkAction::Edit {
            id,
            date,
            start,
            end,
        } => {
            let d = date.as_deref().map(parse_date).transpose()?;
            let (rec, affected) = WorkLogic::edit(
                &mut pool,
                *id,
                d,
                parse_optional_time(start.as_ref())?,
                parse_optional_time(end.as_ref())?,
            )?;
            success(format!(
                "Work record #{} updated: {} {}-{}",
                rec.id,
                rec.date,
                rec.start_str(),
                rec.end_str()
            ));
            report_change(&pool, &affected)?;
        }

        WorkAction::Del { id, yes } => {
            if !*yes
                && !ask_confirmation(&format!("Delete work record #{id}? This action is irreversible."))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            let (rec, affected) = WorkLogic::delete(&mut pool, *id)?;
            success(format!(
                "Work record #{} ({} {}-{}) has been deleted.",
                rec.id,
                rec.date,
                rec.start_str(),
                rec.end_str()
            ));
            report_change(&pool, &affected)?;
        }
    }

    Ok(())
}
