//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Validate input before any store access.
//! - Map repository failures onto the stable service error taxonomy.
//!
//! # Invariants
//! - Callers branch on [`ErrorKind`], never on message text.
//! - Services hold no state between calls; each operation is one
//!   independently schedulable unit of work.

pub mod attendance_service;
pub mod overview_service;
pub mod roster_service;

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Stable failure classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input; no store access was attempted.
    Validation,
    /// Referenced student or record is absent.
    NotFound,
    /// Duplicate registration.
    Conflict,
    /// Unexpected store failure.
    Internal,
}

/// Service-level error carrying a stable kind and a human-readable message.
#[derive(Debug)]
pub enum ServiceError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    Internal(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::Internal(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::StudentNotFound(id) => Self::NotFound(format!("student not found: {id}")),
            RepoError::DuplicateStudent {
                first_name,
                last_name,
            } => Self::Conflict(format!(
                "Student {first_name} {last_name} is already registered"
            )),
            other => Self::Internal(other),
        }
    }
}

/// Trims one required field, rejecting empty input before store access.
fn require_field<'a>(value: &'a str, field: &str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Parses a required `YYYY-MM-DD` session date.
fn require_date(value: &str) -> ServiceResult<chrono::NaiveDate> {
    let trimmed = require_field(value, "date")?;
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        ServiceError::Validation(format!("invalid date `{trimmed}`; expected YYYY-MM-DD"))
    })
}

#[cfg(test)]
mod tests {
    use super::{require_date, require_field, ErrorKind, ServiceError};
    use crate::repo::RepoError;

    #[test]
    fn require_field_rejects_blank_input() {
        let err = require_field("   ", "firstName").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("firstName"));
    }

    #[test]
    fn require_date_parses_iso_dates_only() {
        assert!(require_date("2025-01-13").is_ok());
        let err = require_date("13/01/2025").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn duplicate_student_maps_to_conflict() {
        let err = ServiceError::from(RepoError::DuplicateStudent {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
