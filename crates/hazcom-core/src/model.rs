use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalWord {
    #[serde(rename = "DANGER", alias = "Danger", alias = "danger")]
    Danger,
    #[serde(rename = "WARNING", alias = "Warning", alias = "warning")]
    Warning,
}

impl fmt::Display for SignalWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalWord::Danger => write!(f, "DANGER"),
            SignalWord::Warning => write!(f, "WARNING"),
        }
    }
}

/// A coded GHS statement, e.g. `H225` / "Highly flammable liquid and vapour".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statement {
    pub code: String,
    pub text: String,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{}: {}", self.code, self.text)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecautionaryStatements {
    pub prevention: Vec<Statement>,
    pub response: Vec<Statement>,
    pub storage: Vec<Statement>,
    pub disposal: Vec<Statement>,
}

impl PrecautionaryStatements {
    /// All statements in label order: prevention, response, storage, disposal.
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.prevention
            .iter()
            .chain(&self.response)
            .chain(&self.storage)
            .chain(&self.disposal)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstAid {
    pub eyes: Option<String>,
    pub skin: Option<String>,
    pub inhalation: Option<String>,
    pub ingestion: Option<String>,
}

impl FirstAid {
    pub fn is_documented(&self) -> bool {
        [&self.eyes, &self.skin, &self.inhalation, &self.ingestion]
            .into_iter()
            .any(has_text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PpeRequirements {
    pub eyes: Option<String>,
    pub hands: Option<String>,
    pub respiratory: Option<String>,
    pub body: Option<String>,
}

impl PpeRequirements {
    pub fn is_documented(&self) -> bool {
        [&self.eyes, &self.hands, &self.respiratory, &self.body]
            .into_iter()
            .any(has_text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalProperties {
    pub appearance: Option<String>,
    pub odor: Option<String>,
    pub flash_point: Option<String>,
    #[serde(alias = "pH")]
    pub ph: Option<String>,
    pub boiling_point: Option<String>,
    pub vapor_pressure: Option<String>,
}

/// NFPA 704 diamond. Ratings run 0-4.
///
/// The three ratings are required: a diamond with a missing rating is not
/// read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfpaDiamond {
    pub health: u8,
    pub flammability: u8,
    #[serde(alias = "reactivity")]
    pub instability: u8,
    pub special: Option<String>,
}

/// The hazard and safety content of a product: everything a label or SDS
/// says about it, without inventory bookkeeping.
///
/// Every field is optional on input so that partial extractions and curated
/// catalog entries share one shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardProfile {
    pub product_name: String,
    pub manufacturer: String,
    pub signal_word: Option<SignalWord>,
    /// GHS pictogram codes (`GHS01`..`GHS09`).
    pub pictogram_codes: Vec<String>,
    pub hazard_statements: Vec<Statement>,
    pub precautionary_statements: PrecautionaryStatements,
    pub first_aid: FirstAid,
    pub ppe_required: PpeRequirements,
    pub physical_properties: PhysicalProperties,
    pub storage_requirements: Option<String>,
    pub incompatible_materials: Vec<String>,
    pub cas_numbers: Vec<String>,
    pub un_number: Option<String>,
    pub nfpa_diamond: Option<NfpaDiamond>,
}

impl HazardProfile {
    pub fn has_hazard_classification(&self) -> bool {
        self.signal_word.is_some()
            || !self.pictogram_codes.is_empty()
            || !self.hazard_statements.is_empty()
    }

    /// Documentation check used by the compliance score: the product has a
    /// hazard classification, PPE guidance and first-aid guidance.
    pub fn is_fully_documented(&self) -> bool {
        self.has_hazard_classification()
            && self.ppe_required.is_documented()
            && self.first_aid.is_documented()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdsStatus {
    Current,
    #[default]
    Missing,
    Expired,
}

impl fmt::Display for SdsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdsStatus::Current => write!(f, "current"),
            SdsStatus::Missing => write!(f, "missing"),
            SdsStatus::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddedMethod {
    Scan,
    #[default]
    Manual,
    Import,
}

/// One hazardous product tracked at a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemical {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: HazardProfile,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub container_type: String,
    #[serde(default = "default_container_count")]
    pub container_count: u32,
    #[serde(default)]
    pub labeled: bool,
    #[serde(default)]
    pub label_printed_date: Option<NaiveDate>,
    #[serde(default)]
    pub sds_url: Option<String>,
    #[serde(default)]
    pub sds_uploaded: bool,
    #[serde(default)]
    pub sds_date: Option<NaiveDate>,
    #[serde(default)]
    pub sds_status: SdsStatus,
    pub added_date: NaiveDate,
    #[serde(default)]
    pub added_by: String,
    #[serde(default)]
    pub added_method: AddedMethod,
    pub last_updated: DateTime<Utc>,
}

fn default_container_count() -> u32 {
    1
}

impl Chemical {
    pub fn new_from_profile(
        profile: HazardProfile,
        method: AddedMethod,
        added_by: &str,
        location: &str,
        now: DateTime<Utc>,
    ) -> Chemical {
        Chemical {
            id: Uuid::new_v4(),
            profile,
            location: location.to_string(),
            container_type: String::new(),
            container_count: 1,
            labeled: false,
            label_printed_date: None,
            sds_url: None,
            sds_uploaded: false,
            sds_date: None,
            sds_status: SdsStatus::Missing,
            added_date: now.date_naive(),
            added_by: added_by.to_string(),
            added_method: method,
            last_updated: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.product_name
    }

    pub fn has_sds(&self) -> bool {
        self.sds_uploaded || has_text(&self.sds_url)
    }

    /// The SDS status with the "no SDS means missing" rule applied.
    pub fn effective_sds_status(&self) -> SdsStatus {
        if self.has_sds() {
            self.sds_status
        } else {
            SdsStatus::Missing
        }
    }

    /// Repair a stored status that claims an SDS the record does not have.
    /// Returns true if the record changed.
    pub fn enforce_sds_invariant(&mut self) -> bool {
        let effective = self.effective_sds_status();
        if effective != self.sds_status {
            log::warn!(
                "chemical '{}' has sds_status '{}' but no SDS on file; resetting to '{}'",
                self.name(),
                self.sds_status,
                effective
            );
            self.sds_status = effective;
            return true;
        }
        false
    }
}

/// Training status as historically stored on the employee record.
///
/// Kept for compatibility with existing data; the authoritative status is
/// derived by [`crate::compliance::derive_training_status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyTrainingStatus {
    Current,
    Overdue,
    #[default]
    Pending,
}

impl fmt::Display for LegacyTrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegacyTrainingStatus::Current => write!(f, "current"),
            LegacyTrainingStatus::Overdue => write!(f, "overdue"),
            LegacyTrainingStatus::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub initial_training: Option<NaiveDate>,
    #[serde(default)]
    pub last_training: Option<NaiveDate>,
    #[serde(default)]
    pub status: LegacyTrainingStatus,
    #[serde(default)]
    pub completed_modules: Vec<String>,
    #[serde(default)]
    pub pending_modules: Vec<String>,
}

impl Employee {
    pub fn new(name: &str, role: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role: role.to_string(),
            initial_training: None,
            last_training: None,
            status: LegacyTrainingStatus::Pending,
            completed_modules: Vec::new(),
            pending_modules: Vec::new(),
        }
    }

    /// Owners and managers administer the written program.
    pub fn is_program_coordinator(&self) -> bool {
        let role = self.role.to_lowercase();
        role.contains("owner") || role.contains("manager")
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
