//! Core attendance recording and overview aggregation for rollbook.
//! This crate is the single source of truth for attendance invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendance::{AttendanceRecord, AttendanceStatus, RecordId};
pub use model::schedule::SessionSchedule;
pub use model::student::{Student, StudentId};
pub use repo::attendance_repo::{
    AttendanceRepository, RecordedDate, SqliteAttendanceRepository,
};
pub use repo::roster_repo::{RosterRepository, SqliteRosterRepository};
pub use repo::{RepoError, RepoResult};
pub use service::attendance_service::{AbsenceOutcome, AttendanceService, MarkedAttendance};
pub use service::overview_service::{
    build_day_sheet, build_overview, AttendanceStats, DaySheet, DaySheetEntry, DayStats,
    HistoryReport, OverviewReport, OverviewService, SessionEntry, StudentOverview,
};
pub use service::roster_service::{RegisterRequest, RosterService};
pub use service::{ErrorKind, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
