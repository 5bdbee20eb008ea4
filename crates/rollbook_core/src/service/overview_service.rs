//! Read-side projections: overview grid, day sheet, history.
//!
//! # Responsibility
//! - Project a point-in-time roster + ledger snapshot into the roster x
//!   schedule overview grid with per-student statistics.
//! - Build the per-date day sheet and the recorded-date history.
//!
//! # Invariants
//! - No writes; every projection is a pure function over snapshots and is
//!   safe to run concurrently with anything.
//! - Each student's grid has exactly one entry per schedule date,
//!   positionally aligned, independent of ledger content.
//! - Per-student counts always sum to the schedule length.
//! - History reflects the ledger only: a recorded date missing from the
//!   schedule shows up in history and never widens the grid.

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::schedule::SessionSchedule;
use crate::model::student::{Student, StudentId};
use crate::repo::attendance_repo::{AttendanceRepository, RecordedDate};
use crate::repo::roster_repo::RosterRepository;
use crate::service::{require_date, ServiceResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One cell of the overview grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEntry {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    /// Last-write instant in epoch milliseconds; `None` when absent.
    pub recorded_at: Option<i64>,
}

/// Per-student aggregate counts over the schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub present: u32,
    pub late: u32,
    pub absent: u32,
    pub total_sessions: u32,
    /// `(present + late) / total * 100`, one decimal; 0.0 on an empty
    /// schedule.
    pub attendance_rate: f64,
}

/// One roster row of the overview grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentOverview {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    /// Exactly one entry per schedule date, in schedule order.
    pub attendance: Vec<SessionEntry>,
    pub stats: AttendanceStats,
}

/// The full roster x schedule projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    pub class_dates: Vec<NaiveDate>,
    /// Students in roster order (`last_name`, then `first_name`).
    pub overview: Vec<StudentOverview>,
    pub total_students: u32,
}

/// One roster row of the day sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySheetEntry {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    /// Whether any record exists for the date (late counts as present).
    pub present: bool,
    pub is_late: Option<bool>,
    pub recorded_at: Option<i64>,
}

/// Per-date counts for the day sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStats {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
}

/// Full-roster presence view for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySheet {
    pub date: NaiveDate,
    pub entries: Vec<DaySheetEntry>,
    pub stats: DayStats,
}

/// Distinct recorded dates with counts, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryReport {
    pub dates: Vec<RecordedDate>,
    pub count: u32,
}

/// Builds the overview grid from roster/ledger snapshots and the schedule.
///
/// Records are indexed by `(student_id, date)` once, so the projection costs
/// O(records + students x schedule) instead of rescanning the ledger per
/// cell. Records on dates outside the schedule are ignored here.
pub fn build_overview(
    students: &[Student],
    records: &[AttendanceRecord],
    schedule: &SessionSchedule,
) -> OverviewReport {
    let index: HashMap<(StudentId, NaiveDate), &AttendanceRecord> = records
        .iter()
        .map(|record| ((record.student_id, record.session_date), record))
        .collect();

    let overview = students
        .iter()
        .map(|student| {
            let attendance: Vec<SessionEntry> = schedule
                .iter()
                .map(|date| match index.get(&(student.id, *date)) {
                    Some(record) => SessionEntry {
                        date: *date,
                        status: AttendanceStatus::derive(Some(record.is_late)),
                        recorded_at: Some(record.recorded_at),
                    },
                    None => SessionEntry {
                        date: *date,
                        status: AttendanceStatus::Absent,
                        recorded_at: None,
                    },
                })
                .collect();

            let stats = compute_stats(&attendance);
            StudentOverview {
                student_id: student.id,
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                full_name: student.full_name.clone(),
                attendance,
                stats,
            }
        })
        .collect::<Vec<_>>();

    OverviewReport {
        class_dates: schedule.dates().to_vec(),
        total_students: students.len() as u32,
        overview,
    }
}

/// Builds the full-roster presence view for one date.
///
/// Every roster member gets an entry; students without a record show as not
/// present. `stats.present` counts any record (late included), matching the
/// day-sheet meaning of "showed up".
pub fn build_day_sheet(
    date: NaiveDate,
    students: &[Student],
    records_for_date: &[AttendanceRecord],
) -> DaySheet {
    let by_student: HashMap<StudentId, &AttendanceRecord> = records_for_date
        .iter()
        .map(|record| (record.student_id, record))
        .collect();

    let entries: Vec<DaySheetEntry> = students
        .iter()
        .map(|student| {
            let record = by_student.get(&student.id);
            DaySheetEntry {
                student_id: student.id,
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                full_name: student.full_name.clone(),
                present: record.is_some(),
                is_late: record.map(|r| r.is_late),
                recorded_at: record.map(|r| r.recorded_at),
            }
        })
        .collect();

    let present = entries.iter().filter(|entry| entry.present).count() as u32;
    let total = entries.len() as u32;
    DaySheet {
        date,
        stats: DayStats {
            total,
            present,
            absent: total - present,
        },
        entries,
    }
}

fn compute_stats(attendance: &[SessionEntry]) -> AttendanceStats {
    let mut present = 0u32;
    let mut late = 0u32;
    let mut absent = 0u32;
    for entry in attendance {
        match entry.status {
            AttendanceStatus::Present => present += 1,
            AttendanceStatus::Late => late += 1,
            AttendanceStatus::Absent => absent += 1,
        }
    }

    let total_sessions = attendance.len() as u32;
    AttendanceStats {
        present,
        late,
        absent,
        total_sessions,
        attendance_rate: attendance_rate(present + late, total_sessions),
    }
}

/// Attendance rate in percent, rounded to one decimal place.
fn attendance_rate(attended: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = f64::from(attended) / f64::from(total) * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Read-side service sequencing independent roster/ledger snapshot reads.
pub struct OverviewService<R: RosterRepository, A: AttendanceRepository> {
    roster: R,
    ledger: A,
}

impl<R: RosterRepository, A: AttendanceRepository> OverviewService<R, A> {
    pub fn new(roster: R, ledger: A) -> Self {
        Self { roster, ledger }
    }

    /// Builds the overview grid for the supplied schedule.
    pub fn overview(&self, schedule: &SessionSchedule) -> ServiceResult<OverviewReport> {
        let students = self.roster.list_students()?;
        let records = self.ledger.list_records()?;
        Ok(build_overview(&students, &records, schedule))
    }

    /// Builds the day sheet for one date.
    ///
    /// `Validation` when the date parameter is blank or not `YYYY-MM-DD`.
    pub fn day_sheet(&self, date: &str) -> ServiceResult<DaySheet> {
        let date = require_date(date)?;
        let students = self.roster.list_students()?;
        let records = self.ledger.records_for_date(date)?;
        Ok(build_day_sheet(date, &students, &records))
    }

    /// Lists distinct recorded dates with counts, newest first.
    pub fn history(&self) -> ServiceResult<HistoryReport> {
        let dates = self.ledger.recorded_dates()?;
        let count = dates.len() as u32;
        Ok(HistoryReport { dates, count })
    }
}
