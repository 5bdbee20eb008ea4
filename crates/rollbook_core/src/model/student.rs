//! Student identity model.
//!
//! # Invariants
//! - `id` is stable and never reused for another student.
//! - `(first_name, last_name)` is the natural lookup key; uniqueness is
//!   enforced by the store, not by this type.
//! - Students are immutable once created; the only lifecycle transition is
//!   deletion, which cascades to attendance rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable surrogate identifier for a registered student.
pub type StudentId = Uuid;

/// One registered roster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Stable surrogate key; the name pair is only a uniqueness constraint.
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// Display name; defaults to `"{first_name} {last_name}"`.
    pub full_name: String,
    /// Opaque enrollment token from the card reader, passed through as-is.
    pub card_data: Option<String>,
    /// Creation instant in epoch milliseconds, assigned by the store.
    pub created_at: i64,
}

impl Student {
    /// Creates a student with a generated stable ID.
    ///
    /// `created_at` starts at zero; the store default fills the real value
    /// on insert and read-back returns it.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        full_name: Option<String>,
        card_data: Option<String>,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let full_name = full_name.unwrap_or_else(|| format!("{first_name} {last_name}"));
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            full_name,
            card_data,
            created_at: 0,
        }
    }
}
