//! Roster repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own student identity rows in the `students` table.
//! - Enforce name-pair uniqueness and cascade deletion at the store level.
//!
//! # Invariants
//! - `delete_student` is a single atomic statement; the foreign-key cascade
//!   removes the student's attendance rows in the same unit of work.
//! - Roster listings are always ordered by `(last_name, first_name)`.

use crate::model::student::{Student, StudentId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const STUDENT_SELECT_SQL: &str = "SELECT
    uuid,
    first_name,
    last_name,
    full_name,
    card_data,
    created_at
FROM students";

/// Repository interface for roster operations.
pub trait RosterRepository {
    /// Inserts one student and returns its stable id.
    fn create_student(&self, student: &Student) -> RepoResult<StudentId>;
    /// Looks up a student by the exact `(first_name, last_name)` pair.
    fn find_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<Option<Student>>;
    /// Gets one student by stable id.
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Lists the full roster ordered by `(last_name, first_name)`.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Deletes one student and returns the removed identity.
    ///
    /// The store cascade removes all attendance rows referencing the
    /// student; no orphaned ledger rows remain.
    fn delete_student(&self, id: StudentId) -> RepoResult<Student>;
}

/// SQLite-backed roster repository.
pub struct SqliteRosterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RosterRepository for SqliteRosterRepository<'_> {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId> {
        let result = self.conn.execute(
            "INSERT INTO students (uuid, first_name, last_name, full_name, card_data)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                student.id.to_string(),
                student.first_name.as_str(),
                student.last_name.as_str(),
                student.full_name.as_str(),
                student.card_data.as_deref(),
            ],
        );

        match result {
            Ok(_) => Ok(student.id),
            Err(err) if is_unique_violation(&err) => Err(RepoError::DuplicateStudent {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<Option<Student>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STUDENT_SELECT_SQL}
             WHERE first_name = ?1 AND last_name = ?2;"
        ))?;

        let mut rows = stmt.query(params![first_name, last_name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STUDENT_SELECT_SQL} ORDER BY last_name ASC, first_name ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<Student> {
        let mut stmt = self.conn.prepare(
            "DELETE FROM students
             WHERE uuid = ?1
             RETURNING uuid, first_name, last_name, full_name, card_data, created_at;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_student_row(row);
        }

        Err(RepoError::StudentNotFound(id))
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in students.uuid"))
    })?;

    Ok(Student {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        full_name: row.get("full_name")?,
        card_data: row.get("card_data")?,
        created_at: row.get("created_at")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
