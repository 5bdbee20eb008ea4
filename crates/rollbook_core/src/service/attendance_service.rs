//! Attendance mark use-case service (the upsert engine).
//!
//! # Responsibility
//! - Resolve a student by name pair and apply exactly one ledger write.
//!
//! # Invariants
//! - Input is validated before any store access.
//! - Mark present/late is idempotent under replay and last-writer-wins on
//!   the `is_late` flag; the store upsert guarantees a single surviving row.
//! - Mark absent deletes; a missing row is a no-op reported via `removed`.

use crate::model::attendance::AttendanceRecord;
use crate::model::student::Student;
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::roster_repo::RosterRepository;
use crate::service::{require_date, require_field, ServiceError, ServiceResult};
use log::info;

/// Result of marking a student present or late.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedAttendance {
    pub record: AttendanceRecord,
    /// Outcome line for display, e.g. "Ada Lovelace marked late for 2025-01-13".
    pub message: String,
}

/// Result of marking a student absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceOutcome {
    /// Whether a ledger row was actually removed.
    pub removed: bool,
    pub message: String,
}

/// Attendance service over roster and ledger repositories.
///
/// Resolution reads the roster; the write touches only the ledger. The two
/// repositories stay independent, composed here by sequencing.
pub struct AttendanceService<R: RosterRepository, A: AttendanceRepository> {
    roster: R,
    ledger: A,
}

impl<R: RosterRepository, A: AttendanceRepository> AttendanceService<R, A> {
    pub fn new(roster: R, ledger: A) -> Self {
        Self { roster, ledger }
    }

    /// Marks a student present (`is_late=false`) or late (`is_late=true`).
    ///
    /// # Contract
    /// - `Validation` when any of first/last/date is blank or the date is
    ///   not `YYYY-MM-DD`.
    /// - `NotFound` when no student matches the exact name pair.
    /// - Exactly one atomic upsert; replay with the same arguments leaves
    ///   the ledger unchanged apart from `recorded_at`.
    pub fn mark_present_or_late(
        &self,
        first_name: &str,
        last_name: &str,
        date: &str,
        is_late: bool,
    ) -> ServiceResult<MarkedAttendance> {
        let (student, session_date) = self.resolve(first_name, last_name, date)?;

        let record = self
            .ledger
            .upsert_record(student.id, session_date, is_late)?;

        let status = if is_late { "late" } else { "present" };
        info!(
            "event=attendance_marked module=attendance status=ok student_id={} date={session_date} late={is_late}",
            student.id
        );

        Ok(MarkedAttendance {
            message: format!("{} marked {status} for {session_date}", student.full_name),
            record,
        })
    }

    /// Marks a student absent by deleting the ledger row for the date.
    ///
    /// # Contract
    /// - Same validation and student resolution as marking present.
    /// - Deleting a missing row is a no-op; `removed` reports whether a row
    ///   actually went away.
    pub fn mark_absent(
        &self,
        first_name: &str,
        last_name: &str,
        date: &str,
    ) -> ServiceResult<AbsenceOutcome> {
        let (student, session_date) = self.resolve(first_name, last_name, date)?;

        let removed = self.ledger.delete_record(student.id, session_date)?;
        info!(
            "event=attendance_cleared module=attendance status=ok student_id={} date={session_date} removed={removed}",
            student.id
        );

        Ok(AbsenceOutcome {
            removed,
            message: format!("{} marked absent for {session_date}", student.full_name),
        })
    }

    fn resolve(
        &self,
        first_name: &str,
        last_name: &str,
        date: &str,
    ) -> ServiceResult<(Student, chrono::NaiveDate)> {
        let first_name = require_field(first_name, "firstName")?;
        let last_name = require_field(last_name, "lastName")?;
        let session_date = require_date(date)?;

        let student = self
            .roster
            .find_by_name(first_name, last_name)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Student {first_name} {last_name} not found"))
            })?;

        Ok((student, session_date))
    }
}
