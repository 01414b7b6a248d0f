use chrono::{DateTime, NaiveDate, Utc};
use hazcom_core::compliance::{audit_roster, derive_training_status, training_roster};
use hazcom_core::error::HazcomError;
use hazcom_core::store::{EmployeeRepository, JsonFileStore};
use std::path::Path;

use crate::output;

pub fn run(store_path: &Path, now: DateTime<Utc>, output_format: &str) -> Result<(), HazcomError> {
    let store = JsonFileStore::open(store_path)?;
    let employees = store.employees()?;
    let roster = training_roster(&employees, now);
    let drift = audit_roster(&employees, now);

    match output_format {
        "json" => output::json::print(&roster)?,
        _ => output::table::print_roster(&roster),
    }

    if !drift.is_empty() {
        eprintln!("{} stored status(es) out of date:", drift.len());
        for d in &drift {
            eprintln!("  {d}");
        }
    }
    Ok(())
}

pub fn complete(
    store_path: &Path,
    employee_name: &str,
    module: &str,
    completed_on: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), HazcomError> {
    let mut store = JsonFileStore::open(store_path)?;
    let employee = super::employee::find(&store, employee_name)?;
    let updated = store.record_module_completion(employee.id, module, completed_on, now)?;
    let status = derive_training_status(&updated, now);
    println!(
        "Recorded '{}' for {} on {}: {} of {} modules, {}",
        module,
        updated.name,
        completed_on,
        status.completed_count,
        status.completed_count + status.remaining_count,
        status.status
    );
    Ok(())
}
