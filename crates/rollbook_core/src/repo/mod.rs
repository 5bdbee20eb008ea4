//! Persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL details inside the core persistence boundary.
//! - Surface one shared error type for roster and ledger repositories.
//!
//! # Invariants
//! - Every mutation is a single atomic statement or transaction; a failure
//!   implies zero effect.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod attendance_repo;
pub mod roster_repo;

use crate::db::DbError;
use crate::model::student::StudentId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Shared repository error for roster and attendance persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    StudentNotFound(StudentId),
    /// The `(first_name, last_name)` uniqueness constraint fired.
    DuplicateStudent {
        first_name: String,
        last_name: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::DuplicateStudent {
                first_name,
                last_name,
            } => write!(f, "student already registered: {first_name} {last_name}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
