pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::compliance::curriculum::{canonical_module, completed_modules, MODULE_COUNT};
use crate::compliance::derive_training_status;
use crate::error::HazcomError;
use crate::model::{Chemical, Employee};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed access to the chemical inventory.
pub trait ChemicalRepository {
    fn chemicals(&self) -> Result<Vec<Chemical>, HazcomError>;

    fn chemical(&self, id: Uuid) -> Result<Chemical, HazcomError>;

    /// Case-insensitive exact lookup by product name.
    fn find_chemical_by_name(&self, name: &str) -> Result<Option<Chemical>, HazcomError>;

    /// Insert or replace a chemical. The stored copy has the SDS invariant
    /// applied and `last_updated` set to `now`.
    fn upsert_chemical(&mut self, chemical: Chemical, now: DateTime<Utc>)
        -> Result<Chemical, HazcomError>;

    fn remove_chemical(&mut self, id: Uuid) -> Result<Chemical, HazcomError>;
}

/// Typed access to the employee roster.
pub trait EmployeeRepository {
    fn employees(&self) -> Result<Vec<Employee>, HazcomError>;

    fn employee(&self, id: Uuid) -> Result<Employee, HazcomError>;

    /// Case-insensitive exact lookup by name.
    fn find_employee_by_name(&self, name: &str) -> Result<Option<Employee>, HazcomError>;

    fn upsert_employee(&mut self, employee: Employee) -> Result<Employee, HazcomError>;

    fn remove_employee(&mut self, id: Uuid) -> Result<Employee, HazcomError>;

    /// Record that an employee finished a training module on `completed_on`.
    fn record_module_completion(
        &mut self,
        id: Uuid,
        module: &str,
        completed_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Employee, HazcomError>;
}

/// Everything a site tracks, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub chemicals: Vec<Chemical>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

fn prepare_chemical(mut chemical: Chemical, now: DateTime<Utc>) -> Result<Chemical, HazcomError> {
    if chemical.name().trim().is_empty() {
        return Err(HazcomError::InvalidRecord(
            "chemical product_name must not be empty".into(),
        ));
    }
    chemical.enforce_sds_invariant();
    chemical.last_updated = now;
    Ok(chemical)
}

fn validate_employee(employee: &Employee) -> Result<(), HazcomError> {
    if employee.name.trim().is_empty() {
        return Err(HazcomError::InvalidRecord(
            "employee name must not be empty".into(),
        ));
    }
    Ok(())
}

fn apply_module_completion(
    employee: &mut Employee,
    module: &str,
    completed_on: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), HazcomError> {
    let module = canonical_module(module).ok_or_else(|| {
        HazcomError::InvalidRecord(format!("unknown training module '{module}'"))
    })?;

    let same_module = |id: &String| canonical_module(id).is_some_and(|m| m.id == module.id);
    if !employee.completed_modules.iter().any(same_module) {
        employee.completed_modules.push(module.id.to_string());
    }
    employee.pending_modules.retain(|id| !same_module(id));

    employee.last_training = Some(match employee.last_training {
        Some(previous) if previous > completed_on => previous,
        _ => completed_on,
    });
    if employee.initial_training.is_none()
        && completed_modules(&employee.completed_modules).len() == MODULE_COUNT
    {
        employee.initial_training = Some(completed_on);
    }

    employee.status = derive_training_status(employee, now).status.as_legacy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LegacyTrainingStatus;
    use chrono::TimeZone;

    #[test]
    fn test_module_completion_lifecycle() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap();
        let day = now.date_naive();
        let mut e = Employee::new("Pat", "Tech");
        e.pending_modules = vec!["m1".into(), "ppe".into()];

        apply_module_completion(&mut e, "hazcom-overview", day, now).unwrap();
        assert_eq!(e.completed_modules, vec!["hazcom-overview"]);
        assert_eq!(e.pending_modules, vec!["ppe"]);
        assert_eq!(e.status, LegacyTrainingStatus::Pending);

        // Legacy synonym of an already-completed module is not added again.
        apply_module_completion(&mut e, "m1", day, now).unwrap();
        assert_eq!(e.completed_modules.len(), 1);

        for m in ["m2", "m3", "m4", "m5", "m6", "m7"] {
            apply_module_completion(&mut e, m, day, now).unwrap();
        }
        assert_eq!(e.initial_training, Some(day));
        assert_eq!(e.last_training, Some(day));
        assert!(e.pending_modules.is_empty());
        assert_eq!(e.status, LegacyTrainingStatus::Current);
    }

    #[test]
    fn test_older_completion_keeps_latest_date() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap();
        let mut e = Employee::new("Pat", "Tech");
        let recent = now.date_naive();
        apply_module_completion(&mut e, "m1", recent, now).unwrap();
        apply_module_completion(&mut e, "m2", recent - chrono::Duration::days(20), now).unwrap();
        assert_eq!(e.last_training, Some(recent));
    }

    #[test]
    fn test_unknown_module_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap();
        let mut e = Employee::new("Pat", "Tech");
        assert!(apply_module_completion(&mut e, "m9", now.date_naive(), now).is_err());
        assert!(e.completed_modules.is_empty());
    }
}
