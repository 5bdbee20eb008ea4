use chrono::NaiveDate;
use rollbook_core::db::open_db_in_memory;
use rollbook_core::{
    AttendanceService, OverviewService, RegisterRequest, RosterService, SessionSchedule,
    SqliteAttendanceRepository, SqliteRosterRepository,
};
use rusqlite::Connection;

fn register(conn: &Connection, first: &str, last: &str) {
    RosterService::new(SqliteRosterRepository::new(conn))
        .register(&RegisterRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            ..RegisterRequest::default()
        })
        .unwrap();
}

fn marks(conn: &Connection) -> AttendanceService<SqliteRosterRepository<'_>, SqliteAttendanceRepository<'_>> {
    AttendanceService::new(
        SqliteRosterRepository::new(conn),
        SqliteAttendanceRepository::new(conn),
    )
}

fn views(conn: &Connection) -> OverviewService<SqliteRosterRepository<'_>, SqliteAttendanceRepository<'_>> {
    OverviewService::new(
        SqliteRosterRepository::new(conn),
        SqliteAttendanceRepository::new(conn),
    )
}

#[test]
fn empty_ledger_has_empty_history() {
    let conn = open_db_in_memory().unwrap();
    register(&conn, "Ada", "Lovelace");

    let history = views(&conn).history().unwrap();
    assert!(history.dates.is_empty());
    assert_eq!(history.count, 0);
}

#[test]
fn history_counts_distinct_students_and_late_rows() {
    let conn = open_db_in_memory().unwrap();
    register(&conn, "Ada", "Lovelace");
    register(&conn, "Alan", "Turing");
    register(&conn, "Grace", "Hopper");
    let service = marks(&conn);

    service
        .mark_present_or_late("Ada", "Lovelace", "2025-01-13", false)
        .unwrap();
    service
        .mark_present_or_late("Alan", "Turing", "2025-01-13", true)
        .unwrap();
    service
        .mark_present_or_late("Grace", "Hopper", "2025-01-15", true)
        .unwrap();

    let history = views(&conn).history().unwrap();
    assert_eq!(history.count, 2);

    let day_one = history
        .dates
        .iter()
        .find(|d| d.date == NaiveDate::from_ymd_opt(2025, 1, 13).unwrap())
        .unwrap();
    assert_eq!(day_one.students_present, 2, "late students still attended");
    assert_eq!(day_one.students_late, 1);

    let day_two = history
        .dates
        .iter()
        .find(|d| d.date == NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        .unwrap();
    assert_eq!(day_two.students_present, 1);
    assert_eq!(day_two.students_late, 1);
}

#[test]
fn history_is_ordered_newest_first() {
    let conn = open_db_in_memory().unwrap();
    register(&conn, "Ada", "Lovelace");
    let service = marks(&conn);

    for date in ["2025-01-15", "2025-01-13", "2025-02-03"] {
        service
            .mark_present_or_late("Ada", "Lovelace", date, false)
            .unwrap();
    }

    let history = views(&conn).history().unwrap();
    let dates: Vec<NaiveDate> = history.dates.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
        ]
    );
}

#[test]
fn off_schedule_dates_appear_in_history_but_never_widen_the_grid() {
    let conn = open_db_in_memory().unwrap();
    register(&conn, "Ada", "Lovelace");
    let schedule = SessionSchedule::new(vec![
        NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
    ]);

    // 2025-06-01 is not a scheduled session.
    marks(&conn)
        .mark_present_or_late("Ada", "Lovelace", "2025-06-01", false)
        .unwrap();

    let history = views(&conn).history().unwrap();
    assert_eq!(history.count, 1);
    assert_eq!(
        history.dates[0].date,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    );

    let report = views(&conn).overview(&schedule).unwrap();
    let ada = &report.overview[0];
    assert_eq!(ada.attendance.len(), 2, "grid stays schedule-shaped");
    assert_eq!(ada.stats.absent, 2, "off-schedule record is not a grid hit");
}

#[test]
fn history_shrinks_when_records_are_deleted() {
    let conn = open_db_in_memory().unwrap();
    register(&conn, "Ada", "Lovelace");
    let service = marks(&conn);

    service
        .mark_present_or_late("Ada", "Lovelace", "2025-01-13", false)
        .unwrap();
    service.mark_absent("Ada", "Lovelace", "2025-01-13").unwrap();

    let history = views(&conn).history().unwrap();
    assert!(history.dates.is_empty());
}
