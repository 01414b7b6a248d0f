use super::{
    apply_module_completion, prepare_chemical, validate_employee, ChemicalRepository,
    EmployeeRepository, Inventory,
};
use crate::error::HazcomError;
use crate::model::{Chemical, Employee};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Repository over an in-process [`Inventory`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inventory: Inventory,
}

impl InMemoryStore {
    pub fn new() -> InMemoryStore {
        InMemoryStore::default()
    }

    pub fn from_inventory(inventory: Inventory) -> InMemoryStore {
        InMemoryStore { inventory }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }
}

fn unknown(kind: &'static str, id: Uuid) -> HazcomError {
    HazcomError::UnknownRecord {
        kind,
        id: id.to_string(),
    }
}

impl ChemicalRepository for InMemoryStore {
    fn chemicals(&self) -> Result<Vec<Chemical>, HazcomError> {
        Ok(self.inventory.chemicals.clone())
    }

    fn chemical(&self, id: Uuid) -> Result<Chemical, HazcomError> {
        self.inventory
            .chemicals
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| unknown("chemical", id))
    }

    fn find_chemical_by_name(&self, name: &str) -> Result<Option<Chemical>, HazcomError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .inventory
            .chemicals
            .iter()
            .find(|c| c.name().trim().to_lowercase() == wanted)
            .cloned())
    }

    fn upsert_chemical(
        &mut self,
        chemical: Chemical,
        now: DateTime<Utc>,
    ) -> Result<Chemical, HazcomError> {
        let chemical = prepare_chemical(chemical, now)?;
        match self
            .inventory
            .chemicals
            .iter_mut()
            .find(|c| c.id == chemical.id)
        {
            Some(existing) => *existing = chemical.clone(),
            None => self.inventory.chemicals.push(chemical.clone()),
        }
        Ok(chemical)
    }

    fn remove_chemical(&mut self, id: Uuid) -> Result<Chemical, HazcomError> {
        let pos = self
            .inventory
            .chemicals
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| unknown("chemical", id))?;
        Ok(self.inventory.chemicals.remove(pos))
    }
}

impl EmployeeRepository for InMemoryStore {
    fn employees(&self) -> Result<Vec<Employee>, HazcomError> {
        Ok(self.inventory.employees.clone())
    }

    fn employee(&self, id: Uuid) -> Result<Employee, HazcomError> {
        self.inventory
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| unknown("employee", id))
    }

    fn find_employee_by_name(&self, name: &str) -> Result<Option<Employee>, HazcomError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .inventory
            .employees
            .iter()
            .find(|e| e.name.trim().to_lowercase() == wanted)
            .cloned())
    }

    fn upsert_employee(&mut self, employee: Employee) -> Result<Employee, HazcomError> {
        validate_employee(&employee)?;
        match self
            .inventory
            .employees
            .iter_mut()
            .find(|e| e.id == employee.id)
        {
            Some(existing) => *existing = employee.clone(),
            None => self.inventory.employees.push(employee.clone()),
        }
        Ok(employee)
    }

    fn remove_employee(&mut self, id: Uuid) -> Result<Employee, HazcomError> {
        let pos = self
            .inventory
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| unknown("employee", id))?;
        Ok(self.inventory.employees.remove(pos))
    }

    fn record_module_completion(
        &mut self,
        id: Uuid,
        module: &str,
        completed_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Employee, HazcomError> {
        let employee = self
            .inventory
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| unknown("employee", id))?;
        apply_module_completion(employee, module, completed_on, now)?;
        Ok(employee.clone())
    }
}
