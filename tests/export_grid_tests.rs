mod common;
use common::{TestEnv, d, t};
use worktime::core::holiday::HolidayLogic;
use worktime::core::leave::LeaveLogic;
use worktime::core::period::PeriodData;
use worktime::core::work::WorkLogic;
use worktime::db::pool::DbPool;
use worktime::errors::AppError;
use worktime::export::sheet::{
    COL_COUNT, COL_DATE, COL_DAY, COL_DURATION, COL_LEAVE, COL_MONTH, COL_SUM_DAY,
    COL_SUM_DURATION, COL_SUM_LEAVE_BASE, COL_SUM_NAME, COL_WEEK,
};
use worktime::export::{ExportLogic, Rule, SheetExporter, build_year_grid};
use worktime::models::{Holiday, LeaveRange, LeaveReason};

/// The January 2024 sample: New Year holiday, two work days, two vacation days.
fn january_pool() -> DbPool {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    HolidayLogic::add(&mut pool, &Holiday::new(d(2024, 1, 1), "New Year")).unwrap();
    WorkLogic::add(&mut pool, d(2024, 1, 2), t(9, 0), t(17, 30)).unwrap();
    WorkLogic::add(&mut pool, d(2024, 1, 3), t(9, 0), t(17, 0)).unwrap();
    let vacation = LeaveRange::new(d(2024, 1, 4), d(2024, 1, 5), LeaveReason::Vacation).unwrap();
    LeaveLogic::add(&mut pool, &vacation).unwrap();
    pool
}

#[test]
fn test_header_row() {
    let grid = build_year_grid(&DbPool::in_memory().unwrap().conn, 2024, "Week").unwrap();

    assert_eq!(
        grid.row_text(0, COL_COUNT),
        vec![
            "Month",
            "Week",
            "Date",
            "Weekday",
            "Start",
            "End",
            "Duration",
            "Leave reason",
            "Summary",
            "Sum. days",
            "Sum. duration",
            "Sum. Vacation",
            "Sum. Sick",
            "Sum. Other",
        ]
    );
    assert_eq!(grid.frozen_rows(), 1);
}

#[test]
fn test_january_rows_and_overlaid_summary() {
    let pool = january_pool();
    let grid = build_year_grid(&pool.conn, 2024, "Week").unwrap();

    assert_eq!(grid.name(), "2024");
    assert_eq!(grid.cell(1, COL_MONTH), Some("January 2024"));
    assert_eq!(grid.cell(1, COL_WEEK), Some("Week 1"));

    assert_eq!(grid.cell(1, COL_DATE), Some("2024-01-02"));
    assert_eq!(grid.cell(1, COL_DAY), Some("Tuesday"));
    assert_eq!(grid.cell(1, COL_DURATION), Some("08:30"));
    assert_eq!(grid.cell(2, COL_DATE), Some("2024-01-03"));
    assert_eq!(grid.cell(2, COL_DURATION), Some("08:00"));
    assert_eq!(grid.cell(3, COL_LEAVE), Some("Vacation"));
    assert_eq!(grid.cell(4, COL_DATE), Some("2024-01-05"));
    assert_eq!(grid.cell(4, COL_LEAVE), Some("Vacation"));

    // holidays never produce a row of their own
    assert!((1..=4).all(|r| grid.cell(r, COL_DATE) != Some("2024-01-01")));

    // month summary sits on the month's last data row
    assert_eq!(grid.cell(4, COL_SUM_NAME), Some("January 2024"));
    assert_eq!(grid.cell(4, COL_SUM_DAY), Some("2"));
    assert_eq!(grid.cell(4, COL_SUM_DURATION), Some("16:30"));
    assert_eq!(grid.cell(4, COL_SUM_LEAVE_BASE), Some("2"));
    assert_eq!(grid.cell(4, COL_SUM_LEAVE_BASE + 1), Some("0"));
    assert_eq!(grid.cell(4, COL_SUM_LEAVE_BASE + 2), Some("0"));
}

#[test]
fn test_year_trailer() {
    let pool = january_pool();
    let grid = build_year_grid(&pool.conn, 2024, "Week").unwrap();

    // last data row 4, two blank rows, summary headers, then the year line
    assert_eq!(grid.cell(7, COL_SUM_NAME), Some("Summary"));
    assert_eq!(grid.cell(8, COL_SUM_NAME), Some("Year 2024"));
    assert_eq!(grid.cell(8, COL_SUM_DURATION), Some("16:30"));
    assert_eq!(grid.cell(8, COL_SUM_LEAVE_BASE), Some("2"));
    assert_eq!(grid.last_row(), Some(8));
}

#[test]
fn test_month_and_week_rules() {
    let mut pool = january_pool();
    WorkLogic::add(&mut pool, d(2024, 1, 9), t(9, 0), t(12, 0)).unwrap();
    WorkLogic::add(&mut pool, d(2024, 2, 6), t(9, 0), t(12, 0)).unwrap();

    let grid = build_year_grid(&pool.conn, 2024, "KW").unwrap();

    // January: rows 1..=5, week 2 starts on row 5. February starts on row 6.
    assert_eq!(grid.cell(5, COL_WEEK), Some("KW 2"));
    assert_eq!(grid.cell(6, COL_MONTH), Some("February 2024"));
    assert_eq!(grid.cell(6, COL_WEEK), Some("KW 6"));

    assert_eq!(grid.rows_with_rule(Rule::Month), vec![1, 6]);
    assert_eq!(grid.rows_with_rule(Rule::Week), vec![5]);

    assert_eq!(grid.rule(6, 0), Some(Rule::Month));
    assert_eq!(grid.rule(6, COL_COUNT - 1), Some(Rule::Month));
    assert_eq!(grid.rule(5, COL_MONTH), None);
    assert_eq!(grid.rule(5, COL_WEEK), Some(Rule::Week));
    assert_eq!(grid.rule(5, COL_LEAVE), Some(Rule::Week));
    assert_eq!(grid.rule(5, COL_SUM_NAME), None);
}

#[test]
fn test_empty_month_gets_its_own_summary_row() {
    let mut exporter = SheetExporter::new("2024", "Week").unwrap();
    let summary = exporter
        .write_month(d(2024, 3, 1), &PeriodData::default())
        .unwrap();
    assert!(summary.is_empty());

    let grid = exporter.finish().unwrap();
    assert_eq!(grid.cell(1, COL_MONTH), Some("March 2024"));
    assert_eq!(grid.cell(1, COL_SUM_NAME), Some("March 2024"));
    assert_eq!(grid.cell(1, COL_SUM_DURATION), Some("00:00"));
    assert_eq!(grid.cell(5, COL_SUM_NAME), Some("Year 2024"));
}

#[test]
fn test_year_without_records_has_only_trailer() {
    let pool = january_pool();
    let grid = build_year_grid(&pool.conn, 2023, "Week").unwrap();

    assert_eq!(grid.cell(1, COL_MONTH), None);
    assert_eq!(grid.cell(3, COL_SUM_NAME), Some("Summary"));
    assert_eq!(grid.cell(4, COL_SUM_NAME), Some("Year 2023"));
    assert_eq!(grid.cell(4, COL_SUM_DAY), Some("0"));
    assert!(grid.rows_with_rule(Rule::Month).is_empty());
}

#[test]
fn test_export_writes_one_file() {
    let env = TestEnv::new();
    let pool = january_pool();
    let out = env.out("report.xlsx");

    let path = ExportLogic::export(&pool, out.to_str().unwrap(), Some("2023:2024"), true, "Week")
        .unwrap();
    assert_eq!(path, out);
    assert!(out.exists());
    assert!(std::fs::metadata(&out).unwrap().len() > 0);

    // force overwrites silently
    ExportLogic::export(&pool, out.to_str().unwrap(), None, true, "Week").unwrap();
}

#[test]
fn test_export_rejects_other_extensions_and_bad_ranges() {
    let env = TestEnv::new();
    let pool = january_pool();

    let csv = env.out("report.csv");
    assert!(matches!(
        ExportLogic::export(&pool, csv.to_str().unwrap(), None, true, "Week"),
        Err(AppError::Export(_))
    ));
    assert!(!csv.exists());

    let xlsx = env.out("report.xlsx");
    for bad in ["2024:2023", "24", "2024-01"] {
        assert!(
            matches!(
                ExportLogic::export(&pool, xlsx.to_str().unwrap(), Some(bad), true, "Week"),
                Err(AppError::InvalidPeriod(_))
            ),
            "range {bad}"
        );
    }
    assert!(!xlsx.exists());
}

#[test]
fn test_export_into_missing_directory_fails() {
    let env = TestEnv::new();
    let pool = january_pool();
    let target = env.out("missing").join("report.xlsx");

    assert!(ExportLogic::export(&pool, target.to_str().unwrap(), None, true, "Week").is_err());
}
