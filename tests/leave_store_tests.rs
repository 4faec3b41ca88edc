mod common;
use common::{d, t};
use std::collections::BTreeSet;
use worktime::core::holiday::HolidayLogic;
use worktime::core::leave::LeaveLogic;
use worktime::core::list::{ListLogic, ViewLine};
use worktime::core::work::WorkLogic;
use worktime::db::log::load_log;
use worktime::db::pool::DbPool;
use worktime::db::queries::{leave_reason_on, load_leave_between, load_months};
use worktime::errors::AppError;
use worktime::models::{Holiday, LeaveRange, LeaveReason};

fn pool() -> DbPool {
    DbPool::in_memory().expect("in-memory db")
}

fn range(start: (i32, u32, u32), end: (i32, u32, u32), reason: LeaveReason) -> LeaveRange {
    LeaveRange::new(d(start.0, start.1, start.2), d(end.0, end.1, end.2), reason).unwrap()
}

#[test]
fn test_add_range_writes_one_record_per_day() {
    let mut pool = pool();
    let r = range((2024, 1, 30), (2024, 2, 2), LeaveReason::Vacation);

    let affected = LeaveLogic::add(&mut pool, &r).unwrap();
    assert_eq!(affected, BTreeSet::from([d(2024, 1, 1), d(2024, 2, 1)]));

    let stored = load_leave_between(&pool.conn, d(2024, 1, 1), d(2024, 12, 31)).unwrap();
    assert_eq!(stored.len(), 4);
    assert!(stored.iter().all(|l| l.reason == LeaveReason::Vacation));
}

#[test]
fn test_delete_range_over_month_boundary() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &range((2024, 1, 30), (2024, 2, 2), LeaveReason::Vacation)).unwrap();

    let (deleted, affected) = LeaveLogic::delete(&mut pool, d(2024, 2, 1)).unwrap();
    assert_eq!((deleted.start, deleted.end), (d(2024, 1, 30), d(2024, 2, 2)));
    assert_eq!(affected, BTreeSet::from([d(2024, 1, 1), d(2024, 2, 1)]));

    assert!(load_leave_between(&pool.conn, d(2024, 1, 1), d(2024, 12, 31)).unwrap().is_empty());
    assert!(load_months(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_range_at_reconstructs_from_storage() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &range((2024, 7, 1), (2024, 7, 3), LeaveReason::Sick)).unwrap();
    LeaveLogic::add(&mut pool, &range((2024, 7, 4), (2024, 7, 5), LeaveReason::Vacation)).unwrap();

    let sick = LeaveLogic::range_at(&pool, d(2024, 7, 2)).unwrap();
    assert_eq!((sick.start, sick.end, sick.reason), (d(2024, 7, 1), d(2024, 7, 3), LeaveReason::Sick));

    let vac = LeaveLogic::range_at(&pool, d(2024, 7, 4)).unwrap();
    assert_eq!((vac.start, vac.end), (d(2024, 7, 4), d(2024, 7, 5)));

    assert!(matches!(
        LeaveLogic::range_at(&pool, d(2024, 7, 6)),
        Err(AppError::NoLeaveRecord(_))
    ));
}

#[test]
fn test_leave_on_a_work_day_is_rejected_atomically() {
    let mut pool = pool();
    WorkLogic::add(&mut pool, d(2024, 3, 6), t(9, 0), t(17, 0)).unwrap();

    let err = LeaveLogic::add(&mut pool, &range((2024, 3, 4), (2024, 3, 8), LeaveReason::Vacation))
        .unwrap_err();
    assert!(matches!(err, AppError::DayOccupied(date, _) if date == d(2024, 3, 6)));

    // days before the conflict were rolled back
    assert_eq!(leave_reason_on(&pool.conn, d(2024, 3, 4)).unwrap(), None);
    assert_eq!(leave_reason_on(&pool.conn, d(2024, 3, 5)).unwrap(), None);
}

#[test]
fn test_work_on_a_leave_day_is_rejected() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &LeaveRange::single(d(2024, 3, 6), LeaveReason::Other)).unwrap();

    let err = WorkLogic::add(&mut pool, d(2024, 3, 6), t(9, 0), t(12, 0)).unwrap_err();
    assert!(matches!(err, AppError::DayOccupied(_, _)));

    let (rec, _) = WorkLogic::add(&mut pool, d(2024, 3, 7), t(9, 0), t(12, 0)).unwrap();
    let err = WorkLogic::edit(&mut pool, rec.id, Some(d(2024, 3, 6)), None, None).unwrap_err();
    assert!(matches!(err, AppError::DayOccupied(_, _)));
}

#[test]
fn test_overlapping_leave_is_rejected() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &range((2024, 5, 6), (2024, 5, 8), LeaveReason::Vacation)).unwrap();

    let err = LeaveLogic::add(&mut pool, &range((2024, 5, 8), (2024, 5, 10), LeaveReason::Sick))
        .unwrap_err();
    assert!(matches!(err, AppError::DayOccupied(date, _) if date == d(2024, 5, 8)));
    assert_eq!(leave_reason_on(&pool.conn, d(2024, 5, 9)).unwrap(), None);
}

#[test]
fn test_delete_days_splits_range() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &range((2024, 8, 1), (2024, 8, 10), LeaveReason::Vacation)).unwrap();

    let (remaining, affected) =
        LeaveLogic::delete_days(&mut pool, d(2024, 8, 2), d(2024, 8, 4), d(2024, 8, 6)).unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(affected, BTreeSet::from([d(2024, 8, 1)]));

    let left = LeaveLogic::range_at(&pool, d(2024, 8, 1)).unwrap();
    assert_eq!((left.start, left.end), (d(2024, 8, 1), d(2024, 8, 3)));
    let right = LeaveLogic::range_at(&pool, d(2024, 8, 10)).unwrap();
    assert_eq!((right.start, right.end), (d(2024, 8, 7), d(2024, 8, 10)));
    assert_eq!(leave_reason_on(&pool.conn, d(2024, 8, 5)).unwrap(), None);
}

#[test]
fn test_edit_moves_range_and_reports_both_sides() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &range((2024, 1, 29), (2024, 1, 31), LeaveReason::Vacation)).unwrap();

    let new_range = range((2024, 3, 4), (2024, 3, 5), LeaveReason::Sick);
    let (old, affected) = LeaveLogic::edit(&mut pool, d(2024, 1, 30), &new_range).unwrap();

    assert_eq!((old.start, old.end), (d(2024, 1, 29), d(2024, 1, 31)));
    assert_eq!(affected, BTreeSet::from([d(2024, 1, 1), d(2024, 3, 1)]));
    assert_eq!(leave_reason_on(&pool.conn, d(2024, 1, 30)).unwrap(), None);
    assert_eq!(leave_reason_on(&pool.conn, d(2024, 3, 5)).unwrap(), Some(LeaveReason::Sick));
}

#[test]
fn test_failed_edit_keeps_old_range() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &range((2024, 4, 1), (2024, 4, 2), LeaveReason::Vacation)).unwrap();
    WorkLogic::add(&mut pool, d(2024, 4, 10), t(9, 0), t(10, 0)).unwrap();

    let target = range((2024, 4, 9), (2024, 4, 11), LeaveReason::Vacation);
    assert!(LeaveLogic::edit(&mut pool, d(2024, 4, 1), &target).is_err());

    let still = LeaveLogic::range_at(&pool, d(2024, 4, 2)).unwrap();
    assert_eq!((still.start, still.end), (d(2024, 4, 1), d(2024, 4, 2)));
}

#[test]
fn test_work_edit_and_delete_report_months() {
    let mut pool = pool();
    let (rec, affected) = WorkLogic::add(&mut pool, d(2024, 1, 31), t(9, 0), t(17, 0)).unwrap();
    assert_eq!(affected, BTreeSet::from([d(2024, 1, 1)]));

    let (moved, affected) = WorkLogic::edit(&mut pool, rec.id, Some(d(2024, 2, 1)), None, Some(t(18, 0))).unwrap();
    assert_eq!(moved.end, t(18, 0));
    assert_eq!(affected, BTreeSet::from([d(2024, 1, 1), d(2024, 2, 1)]));

    let (removed, affected) = WorkLogic::delete(&mut pool, rec.id).unwrap();
    assert_eq!(removed.date, d(2024, 2, 1));
    assert_eq!(affected, BTreeSet::from([d(2024, 2, 1)]));

    assert!(matches!(WorkLogic::delete(&mut pool, rec.id), Err(AppError::RecordNotFound(_))));
}

#[test]
fn test_inverted_work_interval_is_rejected() {
    let mut pool = pool();
    assert!(matches!(
        WorkLogic::add(&mut pool, d(2024, 1, 2), t(17, 0), t(9, 0)),
        Err(AppError::InvalidInterval(_))
    ));
}

#[test]
fn test_month_view_merges_everything() {
    let mut pool = pool();
    HolidayLogic::add(&mut pool, &Holiday::new(d(2024, 1, 1), "New Year")).unwrap();
    WorkLogic::add(&mut pool, d(2024, 1, 2), t(9, 0), t(17, 30)).unwrap();
    WorkLogic::add(&mut pool, d(2024, 1, 3), t(9, 0), t(17, 0)).unwrap();
    LeaveLogic::add(&mut pool, &range((2024, 1, 4), (2024, 1, 5), LeaveReason::Vacation)).unwrap();

    let view = ListLogic::month_view(&pool, d(2024, 1, 1)).unwrap();
    assert_eq!(view.lines.len(), 5);
    assert!(matches!(view.lines[0], ViewLine::Week(w) if w.week() == 1));
    assert_eq!(view.summary.total_worked_seconds, 59_400);
    assert_eq!(view.summary.leave_count(LeaveReason::Vacation), 2);

    let (months, year) = ListLogic::year_views(&pool, 2024).unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(year, view.summary);
}

#[test]
fn test_holidays_are_listed_per_year() {
    let mut pool = pool();
    HolidayLogic::add(&mut pool, &Holiday::new(d(2024, 12, 25), "Christmas")).unwrap();
    HolidayLogic::add(&mut pool, &Holiday::new(d(2024, 12, 25), "Christmas Day")).unwrap();
    HolidayLogic::add(&mut pool, &Holiday::new(d(2025, 1, 1), "New Year")).unwrap();

    let list = HolidayLogic::list(&pool, 2024).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Christmas Day");

    HolidayLogic::delete(&mut pool, d(2025, 1, 1)).unwrap();
    assert!(HolidayLogic::list(&pool, 2025).unwrap().is_empty());
}

#[test]
fn test_mutations_are_logged() {
    let mut pool = pool();
    LeaveLogic::add(&mut pool, &LeaveRange::single(d(2024, 6, 3), LeaveReason::Sick)).unwrap();
    WorkLogic::add(&mut pool, d(2024, 6, 4), t(9, 0), t(10, 0)).unwrap();

    let ops: Vec<String> = load_log(&pool.conn).unwrap().into_iter().map(|r| r.1).collect();
    assert!(ops.contains(&"leave_add".to_string()));
    assert!(ops.contains(&"work_add".to_string()));
}
