use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::{ListLogic, MonthView, ViewLine};
use crate::core::summary::Summary;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::LeaveReason;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREY, RESET, color_for_reason};
use crate::utils::date::{month_start, parse_month, today};
use crate::utils::formatting::{bold, pad_left, pad_right};
use crate::utils::secs2readable;
use chrono::Datelike;
use serde::Serialize;

#[derive(Serialize)]
struct MonthJson<'a> {
    month: String,
    summary: &'a Summary,
}

#[derive(Serialize)]
struct YearJson<'a> {
    year: i32,
    months: Vec<MonthJson<'a>>,
    summary: &'a Summary,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List { month, year, json } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    let month = match month {
        Some(m) => parse_month(m)?,
        None => month_start(today()),
    };

    if *year {
        let (views, year_summary) = ListLogic::year_views(&pool, month.year())?;

        if *json {
            let out = YearJson {
                year: month.year(),
                months: views.iter().map(month_json).collect(),
                summary: &year_summary,
            };
            println!("{}", to_json(&out)?);
            return Ok(());
        }

        if views.is_empty() {
            info(format!("No records in {}.", month.year()));
        }
        for view in &views {
            print_month(view, cfg);
        }
        header(format!("Year {}", month.year()));
        println!("{}", summary_line(&year_summary));
        return Ok(());
    }

    let view = ListLogic::month_view(&pool, month)?;

    if *json {
        println!("{}", to_json(&month_json(&view))?);
        return Ok(());
    }

    if view.lines.is_empty() {
        info(format!("No records in {}.", month.format("%B %Y")));
    }
    print_month(&view, cfg);
    Ok(())
}

fn month_json(view: &MonthView) -> MonthJson<'_> {
    MonthJson {
        month: view.month.format("%Y-%m").to_string(),
        summary: &view.summary,
    }
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))
}

fn print_month(view: &MonthView, cfg: &Config) {
    header(view.month.format("%B %Y"));

    for line in &view.lines {
        match line {
            ViewLine::Week(week) => {
                println!("{CYAN}{} {}{RESET}", cfg.week_label, week.week());
            }
            ViewLine::Work(w) => {
                println!(
                    "  {} {}{}-{}  {}",
                    w.date,
                    weekday_cell(w.date, cfg),
                    w.start_str(),
                    w.end_str(),
                    pad_left(&secs2readable(w.duration_seconds(), true), 6)
                );
            }
            ViewLine::Leave(l) => {
                println!(
                    "  {} {}{}{}{}",
                    l.date,
                    weekday_cell(l.date, cfg),
                    color_for_reason(l.reason),
                    l.reason.label(),
                    RESET
                );
            }
        }
    }

    println!("{}", summary_line(&view.summary));
}

fn weekday_cell(date: chrono::NaiveDate, cfg: &Config) -> String {
    if cfg.show_weekday {
        format!("{GREY}{}{RESET} ", pad_right(&date.format("%A").to_string(), 9))
    } else {
        String::new()
    }
}

fn summary_line(summary: &Summary) -> String {
    let mut parts = vec![
        format!("Worked days: {}", summary.worked_days),
        format!("Worked: {}", secs2readable(summary.total_worked_seconds, false)),
    ];
    for reason in LeaveReason::ALL {
        parts.push(format!("{}: {}", reason.label(), summary.leave_count(reason)));
    }
    bold(&parts.join(" | "))
}
