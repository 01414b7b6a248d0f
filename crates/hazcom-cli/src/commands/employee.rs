use hazcom_core::error::HazcomError;
use hazcom_core::model::Employee;
use hazcom_core::store::{EmployeeRepository, JsonFileStore};
use std::path::Path;

use crate::output;

pub fn add(store_path: &Path, name: &str, role: &str) -> Result<(), HazcomError> {
    let mut store = JsonFileStore::open(store_path)?;
    if store.find_employee_by_name(name)?.is_some() {
        return Err(HazcomError::InvalidRecord(format!(
            "employee '{}' is already on the roster",
            name.trim()
        )));
    }
    let employee = store.upsert_employee(Employee::new(name.trim(), role.trim()))?;
    println!("Added {} ({})", employee.name, employee.id);
    Ok(())
}

pub fn list(store_path: &Path, output_format: &str) -> Result<(), HazcomError> {
    let store = JsonFileStore::open(store_path)?;
    let employees = store.employees()?;
    match output_format {
        "json" => output::json::print(&employees)?,
        _ => output::table::print_employees(&employees),
    }
    Ok(())
}

pub fn remove(store_path: &Path, name: &str) -> Result<(), HazcomError> {
    let mut store = JsonFileStore::open(store_path)?;
    let employee = find(&store, name)?;
    store.remove_employee(employee.id)?;
    println!("Removed {}", employee.name);
    Ok(())
}

pub(crate) fn find(store: &JsonFileStore, name: &str) -> Result<Employee, HazcomError> {
    store
        .find_employee_by_name(name)?
        .ok_or_else(|| HazcomError::UnknownRecord {
            kind: "employee",
            id: name.to_string(),
        })
}
