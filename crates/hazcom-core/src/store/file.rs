use super::{ChemicalRepository, EmployeeRepository, InMemoryStore, Inventory};
use crate::error::HazcomError;
use crate::model::{Chemical, Employee};
use chrono::{DateTime, NaiveDate, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Repository persisted as one JSON document:
/// `{ "chemicals": [...], "employees": [...] }`.
///
/// Every mutation rewrites the file through a temporary file in the same
/// directory, so a crash never leaves a half-written store behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl JsonFileStore {
    /// Open a store, treating a missing file as empty.
    pub fn open(path: &Path) -> Result<JsonFileStore, HazcomError> {
        let mut inventory = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| store_error(path, e))?;
            serde_json::from_str::<Inventory>(&content).map_err(|e| store_error(path, e))?
        } else {
            log::debug!("store {} does not exist yet; starting empty", path.display());
            Inventory::default()
        };

        for chemical in &mut inventory.chemicals {
            chemical.enforce_sds_invariant();
        }

        Ok(JsonFileStore {
            path: path.to_path_buf(),
            inner: InMemoryStore::from_inventory(inventory),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn inventory(&self) -> &Inventory {
        self.inner.inventory()
    }

    /// Apply `change` to a copy of the store and keep the copy only once it
    /// has been written, so a failed write leaves the store as it was.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut InMemoryStore) -> Result<T, HazcomError>,
    ) -> Result<T, HazcomError> {
        let mut next = self.inner.clone();
        let result = change(&mut next)?;
        self.write(next.inventory())?;
        self.inner = next;
        Ok(result)
    }

    fn write(&self, inventory: &Inventory) -> Result<(), HazcomError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| store_error(&self.path, e))?;
        serde_json::to_writer_pretty(&mut tmp, inventory).map_err(|e| store_error(&self.path, e))?;
        tmp.write_all(b"\n").map_err(|e| store_error(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| store_error(&self.path, e.error))?;
        log::debug!("saved store to {}", self.path.display());
        Ok(())
    }
}

fn store_error(path: &Path, e: impl std::fmt::Display) -> HazcomError {
    HazcomError::Store {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

impl ChemicalRepository for JsonFileStore {
    fn chemicals(&self) -> Result<Vec<Chemical>, HazcomError> {
        self.inner.chemicals()
    }

    fn chemical(&self, id: Uuid) -> Result<Chemical, HazcomError> {
        self.inner.chemical(id)
    }

    fn find_chemical_by_name(&self, name: &str) -> Result<Option<Chemical>, HazcomError> {
        self.inner.find_chemical_by_name(name)
    }

    fn upsert_chemical(
        &mut self,
        chemical: Chemical,
        now: DateTime<Utc>,
    ) -> Result<Chemical, HazcomError> {
        self.commit(|store| store.upsert_chemical(chemical, now))
    }

    fn remove_chemical(&mut self, id: Uuid) -> Result<Chemical, HazcomError> {
        self.commit(|store| store.remove_chemical(id))
    }
}

impl EmployeeRepository for JsonFileStore {
    fn employees(&self) -> Result<Vec<Employee>, HazcomError> {
        self.inner.employees()
    }

    fn employee(&self, id: Uuid) -> Result<Employee, HazcomError> {
        self.inner.employee(id)
    }

    fn find_employee_by_name(&self, name: &str) -> Result<Option<Employee>, HazcomError> {
        self.inner.find_employee_by_name(name)
    }

    fn upsert_employee(&mut self, employee: Employee) -> Result<Employee, HazcomError> {
        self.commit(|store| store.upsert_employee(employee))
    }

    fn remove_employee(&mut self, id: Uuid) -> Result<Employee, HazcomError> {
        self.commit(|store| store.remove_employee(id))
    }

    fn record_module_completion(
        &mut self,
        id: Uuid,
        module: &str,
        completed_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Employee, HazcomError> {
        self.commit(|store| store.record_module_completion(id, module, completed_on, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AddedMethod, HazardProfile, SdsStatus};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(&dir.path().join("site.json")).unwrap();
        assert!(store.chemicals().unwrap().is_empty());
        assert!(store.employees().unwrap().is_empty());
    }

    #[test]
    fn test_changes_persist_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        let chem = Chemical::new_from_profile(
            HazardProfile {
                product_name: "Acetone".into(),
                ..Default::default()
            },
            AddedMethod::Scan,
            "tester",
            "Booth",
            now(),
        );
        let chem = store.upsert_chemical(chem, now()).unwrap();
        let pat = store.upsert_employee(Employee::new("Pat", "Tech")).unwrap();
        store
            .record_module_completion(pat.id, "m1", now().date_naive(), now())
            .unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.chemical(chem.id).unwrap(), chem);
        assert_eq!(
            reopened.employee(pat.id).unwrap().completed_modules,
            vec!["hazcom-overview"]
        );
    }

    #[test]
    fn test_open_repairs_sds_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(
            &path,
            r#"{
                "chemicals": [{
                    "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
                    "product_name": "Bleach",
                    "sds_status": "current",
                    "added_date": "2025-01-02",
                    "last_updated": "2025-01-02T00:00:00Z"
                }]
            }"#,
        )
        .unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.chemicals().unwrap()[0].sds_status, SdsStatus::Missing);
        assert!(store.employees().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, HazcomError::Store { .. }));
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("site.json");
        let mut store = JsonFileStore::open(&path).unwrap();

        let chem = Chemical::new_from_profile(
            HazardProfile {
                product_name: "Acetone".into(),
                ..Default::default()
            },
            AddedMethod::Manual,
            "tester",
            "Booth",
            now(),
        );
        let err = store.upsert_chemical(chem, now()).unwrap_err();
        assert!(matches!(err, HazcomError::Store { .. }));
        assert!(store.chemicals().unwrap().is_empty());
        assert!(store.upsert_employee(Employee::new("Pat", "Tech")).is_err());
        assert!(store.employees().unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_find_employee_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        let pat = store.upsert_employee(Employee::new("Pat Lee", "Tech")).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.find_employee_by_name(" pat lee ").unwrap(), Some(pat));
        assert_eq!(reopened.find_employee_by_name("Pat").unwrap(), None);
    }
}
