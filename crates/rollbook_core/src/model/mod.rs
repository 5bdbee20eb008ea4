//! Domain models for the attendance core.
//!
//! # Responsibility
//! - Define roster and ledger record shapes shared by repo/service layers.
//! - Derive the tri-state attendance status from record presence.

pub mod attendance;
pub mod schedule;
pub mod student;

pub use attendance::{AttendanceRecord, AttendanceStatus, RecordId};
pub use schedule::SessionSchedule;
pub use student::{Student, StudentId};
