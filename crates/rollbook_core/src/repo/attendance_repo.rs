//! Attendance ledger repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own attendance rows in the `attendance` table, one per
//!   `(student_uuid, session_date)`.
//! - Provide the atomic upsert/delete primitives of the mark operations and
//!   the read queries behind overview, day sheet and history.
//!
//! # Invariants
//! - Upsert is one atomic `INSERT .. ON CONFLICT DO UPDATE`; replay never
//!   produces duplicate rows, and concurrent writers see last-writer-wins.
//! - The surviving row keeps its original id when overwritten.
//! - Absence is never written as a row; marking absent deletes.

use crate::model::attendance::AttendanceRecord;
use crate::model::student::StudentId;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const RECORD_SELECT_SQL: &str = "SELECT
    uuid,
    student_uuid,
    session_date,
    is_late,
    recorded_at
FROM attendance";

/// One distinct date that has ledger rows, with per-date counts.
///
/// Read model for the history view: `students_present` counts distinct
/// students with any record on the date (late included), `students_late`
/// counts rows flagged late.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecordedDate {
    pub date: NaiveDate,
    pub students_present: u32,
    pub students_late: u32,
}

/// Repository interface for ledger operations.
pub trait AttendanceRepository {
    /// Writes exactly one record for `(student_id, date)`.
    ///
    /// Creates the row if missing; otherwise overwrites `is_late` and
    /// refreshes `recorded_at`. Returns the surviving record.
    fn upsert_record(
        &self,
        student_id: StudentId,
        date: NaiveDate,
        is_late: bool,
    ) -> RepoResult<AttendanceRecord>;
    /// Deletes the record for `(student_id, date)` if present.
    ///
    /// Returns whether a row was actually removed; a missing row is a no-op,
    /// not an error.
    fn delete_record(&self, student_id: StudentId, date: NaiveDate) -> RepoResult<bool>;
    /// Gets the record for `(student_id, date)`.
    fn record_for(
        &self,
        student_id: StudentId,
        date: NaiveDate,
    ) -> RepoResult<Option<AttendanceRecord>>;
    /// Full ledger scan, aggregator input.
    fn list_records(&self) -> RepoResult<Vec<AttendanceRecord>>;
    /// All records for one date, day-sheet input.
    fn records_for_date(&self, date: NaiveDate) -> RepoResult<Vec<AttendanceRecord>>;
    /// Distinct dates that have at least one record, newest first.
    fn recorded_dates(&self) -> RepoResult<Vec<RecordedDate>>;
}

/// SQLite-backed ledger repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn upsert_record(
        &self,
        student_id: StudentId,
        date: NaiveDate,
        is_late: bool,
    ) -> RepoResult<AttendanceRecord> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO attendance (uuid, student_uuid, session_date, is_late)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (student_uuid, session_date)
             DO UPDATE SET
                is_late = excluded.is_late,
                recorded_at = (strftime('%s', 'now') * 1000)
             RETURNING uuid, student_uuid, session_date, is_late, recorded_at;",
        )?;

        let mut rows = stmt.query(params![
            Uuid::new_v4().to_string(),
            student_id.to_string(),
            date,
            is_late as i64,
        ])?;

        match rows.next()? {
            Some(row) => parse_record_row(row),
            None => Err(RepoError::InvalidData(
                "attendance upsert returned no row".to_string(),
            )),
        }
    }

    fn delete_record(&self, student_id: StudentId, date: NaiveDate) -> RepoResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM attendance
             WHERE student_uuid = ?1 AND session_date = ?2;",
            params![student_id.to_string(), date],
        )?;

        Ok(removed > 0)
    }

    fn record_for(
        &self,
        student_id: StudentId,
        date: NaiveDate,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL}
             WHERE student_uuid = ?1 AND session_date = ?2;"
        ))?;

        let mut rows = stmt.query(params![student_id.to_string(), date])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn list_records(&self) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL} ORDER BY session_date ASC, student_uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn records_for_date(&self, date: NaiveDate) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL}
             WHERE session_date = ?1
             ORDER BY student_uuid ASC;"
        ))?;

        let mut rows = stmt.query(params![date])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn recorded_dates(&self) -> RepoResult<Vec<RecordedDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                session_date,
                COUNT(DISTINCT student_uuid) AS students_present,
                SUM(CASE WHEN is_late THEN 1 ELSE 0 END) AS students_late
             FROM attendance
             GROUP BY session_date
             ORDER BY session_date DESC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut dates = Vec::new();
        while let Some(row) = rows.next()? {
            dates.push(RecordedDate {
                date: row.get("session_date")?,
                students_present: row.get("students_present")?,
                students_late: row.get("students_late")?,
            });
        }

        Ok(dates)
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<AttendanceRecord> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in attendance.uuid"
        ))
    })?;

    let student_text: String = row.get("student_uuid")?;
    let student_id = Uuid::parse_str(&student_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{student_text}` in attendance.student_uuid"
        ))
    })?;

    let is_late = match row.get::<_, i64>("is_late")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_late value `{other}` in attendance.is_late"
            )));
        }
    };

    Ok(AttendanceRecord {
        id,
        student_id,
        session_date: row.get("session_date")?,
        is_late,
        recorded_at: row.get("recorded_at")?,
    })
}
