mod common;
use common::{d, leave, t, work};
use worktime::core::summary::Summary;
use worktime::core::timeline::{TimelineEvent, TimelineMerger};
use worktime::errors::AppError;
use worktime::models::{LeaveReason, LeaveRecord, WorkRecord};

/// Compact event description: "W:2024-01-08" / "work:2024-01-02" / "leave:2024-01-04".
fn describe(events: &[TimelineEvent<'_>]) -> Vec<String> {
    events
        .iter()
        .map(|ev| match ev {
            TimelineEvent::WeekStart { date, week } => format!("W{}:{}", week.week(), date),
            TimelineEvent::Work(w) => format!("work:{}", w.date),
            TimelineEvent::Leave(l) => format!("leave:{}", l.date),
        })
        .collect()
}

fn january_2024() -> (Vec<WorkRecord>, Vec<LeaveRecord>, Vec<chrono::NaiveDate>) {
    let work = vec![
        work(1, d(2024, 1, 2), t(9, 0), t(17, 30)),
        work(2, d(2024, 1, 3), t(9, 0), t(17, 0)),
    ];
    let leave = vec![
        leave(d(2024, 1, 4), LeaveReason::Vacation),
        leave(d(2024, 1, 5), LeaveReason::Vacation),
    ];
    let holidays = vec![d(2024, 1, 1)];
    (work, leave, holidays)
}

#[test]
fn test_january_example() {
    let (work, leave, holidays) = january_2024();
    let merger = TimelineMerger::new(&work, &leave, &holidays);

    let events = merger.events().expect("merge");
    assert_eq!(
        describe(&events),
        vec![
            "W1:2024-01-01",
            "work:2024-01-02",
            "work:2024-01-03",
            "leave:2024-01-04",
            "leave:2024-01-05",
        ]
    );

    let month = fold(&events);

    assert_eq!(month.worked_days, 2);
    assert_eq!(month.total_worked_seconds, 59_400);
    assert_eq!(month.leave_count(LeaveReason::Vacation), 2);
    assert_eq!(month.leave_count(LeaveReason::Sick), 0);
    assert_eq!(month.added_count, 4);
}

#[test]
fn test_week_start_once_per_week_before_first_visitation() {
    let work = vec![
        work(1, d(2024, 1, 10), t(8, 0), t(12, 0)), // Wed, week 2
        work(2, d(2024, 1, 12), t(8, 0), t(12, 0)), // Fri, week 2
        work(3, d(2024, 1, 22), t(8, 0), t(12, 0)), // Mon, week 4
    ];
    let leave = vec![
        leave(d(2024, 1, 11), LeaveReason::Sick),  // Thu, week 2
        leave(d(2024, 1, 23), LeaveReason::Other), // Tue, week 4
    ];

    let events = TimelineMerger::new(&work, &leave, &[]).events().unwrap();
    assert_eq!(
        describe(&events),
        vec![
            "W2:2024-01-10",
            "work:2024-01-10",
            "leave:2024-01-11",
            "work:2024-01-12",
            "W4:2024-01-22",
            "work:2024-01-22",
            "leave:2024-01-23",
        ]
    );

    let dates: Vec<_> = events.iter().map(|e| e.date()).collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_multiple_work_records_same_day_keep_stored_order() {
    let work = vec![
        work(7, d(2024, 2, 5), t(8, 0), t(12, 0)),
        work(3, d(2024, 2, 5), t(13, 0), t(17, 0)),
    ];

    let events = TimelineMerger::new(&work, &[], &[]).events().unwrap();
    let ids: Vec<i64> = events
        .iter()
        .filter_map(|e| match e {
            TimelineEvent::Work(w) => Some(w.id),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec![7, 3]);
    assert_eq!(events.iter().filter(|e| !e.is_visitation()).count(), 1);
}

#[test]
fn test_holiday_only_week_still_marks_week() {
    let work = vec![work(1, d(2024, 12, 30), t(9, 0), t(10, 0))];
    let holidays = vec![d(2024, 12, 25), d(2024, 12, 26)];

    let events = TimelineMerger::new(&work, &[], &holidays).events().unwrap();
    assert_eq!(
        describe(&events),
        vec!["W52:2024-12-25", "W1:2024-12-30", "work:2024-12-30"]
    );
}

#[test]
fn test_holiday_on_a_work_day_is_allowed() {
    let work = vec![work(1, d(2024, 5, 1), t(9, 0), t(11, 0))];
    let holidays = vec![d(2024, 5, 1)];

    let events = TimelineMerger::new(&work, &[], &holidays).events().unwrap();
    assert_eq!(describe(&events), vec!["W18:2024-05-01", "work:2024-05-01"]);
}

#[test]
fn test_work_and_leave_on_same_day_is_a_consistency_error() {
    let work = vec![work(1, d(2024, 1, 4), t(9, 0), t(17, 0))];
    let leave = vec![leave(d(2024, 1, 4), LeaveReason::Vacation)];

    let mut seen = 0;
    let result = TimelineMerger::new(&work, &leave, &[]).run(|_| {
        seen += 1;
        Ok(())
    });

    assert!(matches!(result, Err(AppError::Consistency(_))));
    assert_eq!(seen, 0, "no events before the precondition check");
}

#[test]
fn test_unsorted_input_is_rejected() {
    let work = vec![
        work(1, d(2024, 1, 5), t(9, 0), t(17, 0)),
        work(2, d(2024, 1, 4), t(9, 0), t(17, 0)),
    ];
    assert!(matches!(
        TimelineMerger::new(&work, &[], &[]).events(),
        Err(AppError::Consistency(_))
    ));

    let leave = vec![
        leave(d(2024, 1, 4), LeaveReason::Vacation),
        leave(d(2024, 1, 4), LeaveReason::Sick),
    ];
    assert!(matches!(
        TimelineMerger::new(&[], &leave, &[]).events(),
        Err(AppError::Consistency(_))
    ));
}

#[test]
fn test_visitor_error_stops_the_merge() {
    let (work, leave, holidays) = january_2024();

    let mut visits = 0;
    let result = TimelineMerger::new(&work, &leave, &holidays).run(|ev| {
        if ev.is_visitation() {
            visits += 1;
        }
        if visits == 2 {
            return Err(AppError::Export("boom".into()));
        }
        Ok(())
    });

    assert!(matches!(result, Err(AppError::Export(_))));
    assert_eq!(visits, 2);
}

#[test]
fn test_empty_period() {
    let events = TimelineMerger::new(&[], &[], &[]).events().unwrap();
    assert!(events.is_empty());

    let summary = Summary::new();
    assert!(summary.is_empty());
    assert_eq!(summary.total_worked_seconds, 0);
}

#[test]
fn test_merge_is_repeatable() {
    let (work, leave, holidays) = january_2024();
    let merger = TimelineMerger::new(&work, &leave, &holidays);

    let first = merger.events().unwrap();
    let second = merger.events().unwrap();
    assert_eq!(first, second);

    assert_eq!(fold(&first), fold(&second));
}

fn fold(events: &[TimelineEvent<'_>]) -> Summary {
    let mut s = Summary::new();
    events.iter().for_each(|e| s.observe(e));
    s
}
