use super::curriculum::{completed_modules, MODULE_COUNT};
use crate::model::{Employee, LegacyTrainingStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Refresher training is due this many days after the last session.
pub const REFRESHER_INTERVAL_DAYS: i64 = 365;

/// Trained employees within this many days of their due date are "due soon".
pub const DUE_SOON_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerivedTrainingStatus {
    Current,
    DueSoon,
    Overdue,
    InProgress,
    NotStarted,
}

impl DerivedTrainingStatus {
    /// Current and due-soon employees count as trained.
    pub fn is_trained(&self) -> bool {
        matches!(self, DerivedTrainingStatus::Current | DerivedTrainingStatus::DueSoon)
    }

    /// Projection onto the three-valued status kept on employee records.
    pub fn as_legacy(&self) -> LegacyTrainingStatus {
        match self {
            DerivedTrainingStatus::Current | DerivedTrainingStatus::DueSoon => {
                LegacyTrainingStatus::Current
            }
            DerivedTrainingStatus::Overdue => LegacyTrainingStatus::Overdue,
            DerivedTrainingStatus::InProgress | DerivedTrainingStatus::NotStarted => {
                LegacyTrainingStatus::Pending
            }
        }
    }
}

impl fmt::Display for DerivedTrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DerivedTrainingStatus::Current => "current",
            DerivedTrainingStatus::DueSoon => "due-soon",
            DerivedTrainingStatus::Overdue => "overdue",
            DerivedTrainingStatus::InProgress => "in-progress",
            DerivedTrainingStatus::NotStarted => "not-started",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStatus {
    pub status: DerivedTrainingStatus,
    pub completed_count: usize,
    pub remaining_count: usize,
    /// Whole days left before refresher training is due, not counting
    /// today; negative once lapsed.
    /// Only set when the full curriculum is complete and dated.
    pub days_until_due: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Derive an employee's training status from completed modules and the
/// date of their last training.
///
/// This is the authoritative status; the `status` stored on the record is
/// only a cached projection of it.
pub fn derive_training_status(employee: &Employee, now: DateTime<Utc>) -> TrainingStatus {
    let completed_count = completed_modules(&employee.completed_modules).len();
    let remaining_count = MODULE_COUNT - completed_count;

    if completed_count < MODULE_COUNT {
        let status = if completed_count == 0 {
            DerivedTrainingStatus::NotStarted
        } else {
            DerivedTrainingStatus::InProgress
        };
        return TrainingStatus {
            status,
            completed_count,
            remaining_count,
            days_until_due: None,
            due_date: None,
        };
    }

    let Some(last_training) = employee.last_training else {
        // Completed but undated: currency cannot be certified.
        return TrainingStatus {
            status: DerivedTrainingStatus::Overdue,
            completed_count,
            remaining_count,
            days_until_due: None,
            due_date: None,
        };
    };

    let due_date = last_training + Duration::days(REFRESHER_INTERVAL_DAYS);
    // Full days between the end of today and the start of the due date,
    // so any time of day yields the same count. On the anniversary this is
    // -1: the due date is the first day out of compliance.
    let days = (due_date - now.date_naive()).num_days() - 1;

    let status = if days < 0 {
        DerivedTrainingStatus::Overdue
    } else if days <= DUE_SOON_WINDOW_DAYS {
        DerivedTrainingStatus::DueSoon
    } else {
        DerivedTrainingStatus::Current
    };

    TrainingStatus {
        status,
        completed_count,
        remaining_count,
        days_until_due: Some(days),
        due_date: Some(due_date),
    }
}

/// Disagreement between the stored and the derived training status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDrift {
    pub employee: String,
    pub stored: LegacyTrainingStatus,
    pub expected: LegacyTrainingStatus,
    pub derived: DerivedTrainingStatus,
}

impl fmt::Display for StatusDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: stored status '{}' but training records say '{}' ({})",
            self.employee, self.stored, self.expected, self.derived
        )
    }
}

/// Compare the cached status on an employee record with the derived one.
pub fn audit_stored_status(employee: &Employee, now: DateTime<Utc>) -> Option<StatusDrift> {
    let derived = derive_training_status(employee, now).status;
    let expected = derived.as_legacy();
    (employee.status != expected).then(|| StatusDrift {
        employee: employee.name.clone(),
        stored: employee.status,
        expected,
        derived,
    })
}
