//! Roster use-case service.
//!
//! # Responsibility
//! - Register and delete students, list the roster.
//!
//! # Invariants
//! - Registration validates names before any store access and reports an
//!   exact-match duplicate as `Conflict`.
//! - Deletion is one atomic store operation; the cascade removes the
//!   student's ledger rows with it.

use crate::model::student::{Student, StudentId};
use crate::repo::roster_repo::RosterRepository;
use crate::service::{require_field, ServiceError, ServiceResult};
use log::info;

/// Request model for registering one student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    /// Display name; defaults to `"{first} {last}"` when absent.
    pub full_name: Option<String>,
    /// Opaque enrollment token from the card reader.
    pub card_data: Option<String>,
}

/// Roster service facade over a repository implementation.
pub struct RosterService<R: RosterRepository> {
    repo: R,
}

impl<R: RosterRepository> RosterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers one student.
    ///
    /// # Contract
    /// - `Validation` when first or last name is blank.
    /// - `Conflict` when the exact `(first, last)` pair is already
    ///   registered. Comparison is deliberately exact; case or whitespace
    ///   variants register as distinct students.
    pub fn register(&self, request: &RegisterRequest) -> ServiceResult<Student> {
        let first_name = require_field(&request.first_name, "firstName")?;
        let last_name = require_field(&request.last_name, "lastName")?;

        if let Some(existing) = self.repo.find_by_name(first_name, last_name)? {
            return Err(ServiceError::Conflict(format!(
                "Student {} is already registered",
                existing.full_name
            )));
        }

        let student = Student::new(
            first_name,
            last_name,
            request.full_name.clone().filter(|name| !name.trim().is_empty()),
            request.card_data.clone(),
        );
        // The unique constraint backstops a concurrent duplicate insert; the
        // repo maps that to DuplicateStudent and From<RepoError> to Conflict.
        let id = self.repo.create_student(&student)?;

        info!(
            "event=student_registered module=roster status=ok student_id={id}"
        );

        match self.repo.get_student(id)? {
            Some(created) => Ok(created),
            None => Ok(student),
        }
    }

    /// Deletes one student by stable id, cascading to attendance rows.
    pub fn delete(&self, id: StudentId) -> ServiceResult<Student> {
        let deleted = self.repo.delete_student(id)?;
        info!("event=student_deleted module=roster status=ok student_id={id}");
        Ok(deleted)
    }

    /// Lists the roster ordered by `(last_name, first_name)`.
    pub fn list(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.repo.list_students()?)
    }
}
