//! Attendance ledger record and derived tri-state status.
//!
//! # Invariants
//! - The ledger holds at most one record per `(student_id, session_date)`.
//! - Absence is never stored; it is derived from the missing record at read
//!   time. Writing explicit "absent" rows would break the delete semantics
//!   of marking absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one ledger row.
pub type RecordId = Uuid;

/// One attendance fact: a student was present (possibly late) on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub student_id: Uuid,
    /// Calendar date of the session, no time component.
    pub session_date: NaiveDate,
    pub is_late: bool,
    /// Instant of the last write in epoch milliseconds; refreshed on
    /// overwrite.
    pub recorded_at: i64,
}

/// Tri-state status derived per student per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

impl AttendanceStatus {
    /// Derives the status from the ledger lookup result.
    ///
    /// - record with `is_late=true` -> `Late`
    /// - record with `is_late=false` -> `Present`
    /// - no record -> `Absent`
    pub fn derive(is_late: Option<bool>) -> Self {
        match is_late {
            Some(true) => Self::Late,
            Some(false) => Self::Present,
            None => Self::Absent,
        }
    }

    /// Whether the student attended the session at all (late counts).
    pub fn attended(self) -> bool {
        !matches!(self, Self::Absent)
    }
}
