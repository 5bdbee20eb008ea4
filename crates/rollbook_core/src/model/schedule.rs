//! Externally supplied session schedule.
//!
//! The schedule is injected configuration, never derived from the ledger and
//! never a compiled-in constant: a term's date list varies per course
//! offering. The overview grid is always aligned positionally to this list,
//! while the history view deliberately ignores it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered list of session dates for one term.
///
/// May be empty (term not configured yet); aggregation then yields empty
/// grids with a 0.0 attendance rate rather than dividing by zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionSchedule {
    dates: Vec<NaiveDate>,
}

impl SessionSchedule {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self { dates }
    }

    /// Number of scheduled sessions (the overview grid width).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Session dates in schedule order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl From<Vec<NaiveDate>> for SessionSchedule {
    fn from(dates: Vec<NaiveDate>) -> Self {
        Self::new(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::SessionSchedule;
    use chrono::NaiveDate;

    #[test]
    fn deserializes_from_plain_date_array() {
        let schedule: SessionSchedule =
            serde_json::from_str(r#"["2025-01-13", "2025-01-15"]"#).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(
            schedule.dates()[0],
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
        );
    }

    #[test]
    fn empty_schedule_is_allowed() {
        let schedule = SessionSchedule::default();
        assert!(schedule.is_empty());
        assert_eq!(schedule.len(), 0);
    }
}
