pub mod curriculum;
pub mod outcome;
pub mod score;
pub mod training;

pub use outcome::{
    ActionItem, ComplianceScore, ComplianceStatus, EmployeeTraining, Improvement, Pillar,
    PillarScore,
};
pub use score::calculate_compliance_score;
pub use training::{
    audit_stored_status, derive_training_status, DerivedTrainingStatus, StatusDrift,
    TrainingStatus,
};

use crate::model::Employee;
use chrono::{DateTime, Utc};

/// Derived training status for every employee, in roster order.
pub fn training_roster(employees: &[Employee], now: DateTime<Utc>) -> Vec<EmployeeTraining> {
    employees
        .iter()
        .map(|e| EmployeeTraining {
            employee_id: e.id,
            name: e.name.clone(),
            role: e.role.clone(),
            training: derive_training_status(e, now),
        })
        .collect()
}

/// Employees whose stored status disagrees with their training records.
pub fn audit_roster(employees: &[Employee], now: DateTime<Utc>) -> Vec<StatusDrift> {
    let drift: Vec<StatusDrift> = employees
        .iter()
        .filter_map(|e| audit_stored_status(e, now))
        .collect();
    for d in &drift {
        log::warn!("{d}");
    }
    drift
}
