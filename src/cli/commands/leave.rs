use crate::cli::commands::{ask_confirmation, report_change};
use crate::cli::parser::{Commands, LeaveAction};
use crate::config::Config;
use crate::core::leave::LeaveLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::LeaveRange;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;

fn describe(range: &LeaveRange) -> String {
    format!(
        "{} → {} ({}, {} day(s))",
        range.start,
        range.end,
        range.reason.label(),
        range.day_count()
    )
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Leave { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        LeaveAction::Add { from, to, reason } => {
            let start = parse_date(from)?;
            let end = to.as_deref().map(parse_date).transpose()?.unwrap_or(start);
            let range = LeaveRange::new(start, end, *reason)?;

            let affected = LeaveLogic::add(&mut pool, &range)?;
            success(format!("Leave added: {}", describe(&range)));
            report_change(&pool, &affected)?;
        }

        LeaveAction::Show { date } => {
            let range = LeaveLogic::range_at(&pool, parse_date(date)?)?;
            println!("{}", describe(&range));
        }

        LeaveAction::Edit {
            date,
            from,
            to,
            reason,
        } => {
            let anchor = parse_date(date)?;
            let current = LeaveLogic::range_at(&pool, anchor)?;
            let new_range = LeaveRange::new(
                parse_date(from)?,
                parse_date(to)?,
                reason.unwrap_or(current.reason),
            )?;

            let (old, affected) = LeaveLogic::edit(&mut pool, anchor, &new_range)?;
            success(format!(
                "Leave updated: {} ⇒ {}",
                describe(&old),
                describe(&new_range)
            ));
            report_change(&pool, &affected)?;
        }

        LeaveAction::Del {
            date,
            from,
            to,
            yes,
        } => {
            let anchor = parse_date(date)?;
            let range = LeaveLogic::range_at(&pool, anchor)?;

            let sub = match (from, to) {
                (Some(f), Some(t)) => Some((parse_date(f)?, parse_date(t)?)),
                _ => None,
            };

            let prompt = match sub {
                Some((f, t)) => format!("Delete leave {f} → {t} out of {}?", describe(&range)),
                None => format!("Delete leave {}?", describe(&range)),
            };
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let affected = match sub {
                Some((f, t)) => {
                    let (remaining, affected) = LeaveLogic::delete_days(&mut pool, anchor, f, t)?;
                    success(format!("Leave {f} → {t} has been deleted."));
                    for r in &remaining {
                        info(format!("Remaining: {}", describe(r)));
                    }
                    affected
                }
                None => {
                    let (removed, affected) = LeaveLogic::delete(&mut pool, anchor)?;
                    success(format!("Leave {} has been deleted.", describe(&removed)));
                    affected
                }
            };
            report_change(&pool, &affected)?;
        }
    }

    Ok(())
}
