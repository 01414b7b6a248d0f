use super::training::TrainingStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One independently scored compliance dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pillar {
    SdsCurrency,
    Labels,
    Documentation,
    Training,
}

impl Pillar {
    pub const ALL: [Pillar; 4] = [
        Pillar::SdsCurrency,
        Pillar::Labels,
        Pillar::Documentation,
        Pillar::Training,
    ];

    /// Share of the overall score, in percentage points. Sums to 100.
    pub fn weight(&self) -> u32 {
        match self {
            Pillar::SdsCurrency => 35,
            Pillar::Labels => 20,
            Pillar::Documentation => 15,
            Pillar::Training => 30,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Pillar::SdsCurrency => "SDS currency",
            Pillar::Labels => "Labels",
            Pillar::Documentation => "Chemical documentation",
            Pillar::Training => "Training currency",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Score for a single pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub weight: u32,
    /// Entities that satisfy the pillar.
    pub compliant: usize,
    /// Entities the pillar applies to. Zero means vacuously compliant.
    pub total: usize,
    /// Rounded percentage, 0-100.
    pub score: u32,
}

impl PillarScore {
    pub fn deficient(&self) -> usize {
        self.total - self.compliant
    }
}

/// A single deficiency to be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub pillar: Pillar,
    pub subject_id: Uuid,
    /// Chemical or employee name.
    pub subject: String,
    pub description: String,
}

/// The estimated gain from clearing every deficiency in one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub pillar: Pillar,
    pub deficiencies: usize,
    /// Overall score points gained if resolved.
    pub points: u32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Excellent,
    Good,
    NeedsAttention,
}

impl ComplianceStatus {
    pub fn from_score(overall: u32) -> ComplianceStatus {
        if overall >= 90 {
            ComplianceStatus::Excellent
        } else if overall >= 70 {
            ComplianceStatus::Good
        } else {
            ComplianceStatus::NeedsAttention
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Excellent => write!(f, "excellent"),
            ComplianceStatus::Good => write!(f, "good"),
            ComplianceStatus::NeedsAttention => write!(f, "needs attention"),
        }
    }
}

/// Site-wide compliance readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceScore {
    /// Weighted overall percentage, 0-100.
    pub overall: u32,
    pub status: ComplianceStatus,
    /// Per-pillar scores, in [`Pillar::ALL`] order.
    pub breakdown: Vec<PillarScore>,
    pub action_item_count: usize,
    pub action_items: Vec<ActionItem>,
    /// Highest-leverage fixes first.
    pub improvements: Vec<Improvement>,
    /// The owner or manager who administers the written program, if on the roster.
    pub program_coordinator: Option<String>,
}

impl ComplianceScore {
    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarScore> {
        self.breakdown.iter().find(|p| p.pillar == pillar)
    }
}

/// Derived training status for one employee, for rosters and dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTraining {
    pub employee_id: Uuid,
    pub name: String,
    pub role: String,
    #[serde(flatten)]
    pub training: TrainingStatus,
}
