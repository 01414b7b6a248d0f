use super::outcome::{
    ActionItem, ComplianceScore, ComplianceStatus, Improvement, Pillar, PillarScore,
};
use super::training::{derive_training_status, DerivedTrainingStatus, TrainingStatus};
use crate::model::{Chemical, Employee, SdsStatus};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Compute the weighted compliance score for a site.
///
/// A pillar with nothing to measure (no chemicals, or no employees) scores
/// 100% rather than counting as a deficiency.
pub fn calculate_compliance_score(
    chemicals: &[Chemical],
    employees: &[Employee],
    now: DateTime<Utc>,
) -> ComplianceScore {
    let mut action_items = Vec::new();
    let mut tallies = Vec::with_capacity(Pillar::ALL.len());

    for pillar in Pillar::ALL {
        let (compliant, total) = match pillar {
            Pillar::Training => {
                let mut trained = 0;
                for employee in employees {
                    let status = derive_training_status(employee, now);
                    if status.status.is_trained() {
                        trained += 1;
                    } else {
                        action_items.push(ActionItem {
                            pillar,
                            subject_id: employee.id,
                            subject: employee.name.clone(),
                            description: training_action(&status),
                        });
                    }
                }
                (trained, employees.len())
            }
            _ => {
                let mut ok = 0;
                for chemical in chemicals {
                    match chemical_deficiency(pillar, chemical) {
                        None => ok += 1,
                        Some(description) => action_items.push(ActionItem {
                            pillar,
                            subject_id: chemical.id,
                            subject: chemical.name().to_string(),
                            description,
                        }),
                    }
                }
                (ok, chemicals.len())
            }
        };
        tallies.push((pillar, compliant, total));
    }

    let overall = weighted_overall(&tallies, None);
    let breakdown: Vec<PillarScore> = tallies
        .iter()
        .map(|&(pillar, compliant, total)| PillarScore {
            pillar,
            weight: pillar.weight(),
            compliant,
            total,
            score: to_percent(fraction(compliant, total) * Decimal::ONE_HUNDRED),
        })
        .collect();

    let mut improvements: Vec<Improvement> = breakdown
        .iter()
        .filter(|p| p.deficient() > 0)
        .map(|p| {
            let fixed = weighted_overall(&tallies, Some(p.pillar));
            Improvement {
                pillar: p.pillar,
                deficiencies: p.deficient(),
                points: fixed.saturating_sub(overall),
                description: improvement_text(p.pillar, p.deficient()),
            }
        })
        .collect();
    // Stable sort keeps pillar order between equal gains.
    improvements.sort_by(|a, b| b.points.cmp(&a.points));

    let program_coordinator = employees
        .iter()
        .find(|e| e.is_program_coordinator())
        .map(|e| e.name.clone());

    log::debug!(
        "compliance score {} across {} chemicals and {} employees ({} action items)",
        overall,
        chemicals.len(),
        employees.len(),
        action_items.len()
    );

    ComplianceScore {
        overall,
        status: ComplianceStatus::from_score(overall),
        breakdown,
        action_item_count: action_items.len(),
        action_items,
        improvements,
        program_coordinator,
    }
}

/// Overall score from pillar tallies, optionally treating one pillar as
/// fully resolved.
fn weighted_overall(tallies: &[(Pillar, usize, usize)], resolved: Option<Pillar>) -> u32 {
    let total: Decimal = tallies
        .iter()
        .map(|&(pillar, compliant, total)| {
            let share = if resolved == Some(pillar) {
                Decimal::ONE
            } else {
                fraction(compliant, total)
            };
            Decimal::from(pillar.weight()) * share
        })
        .sum();
    to_percent(total)
}

fn fraction(compliant: usize, total: usize) -> Decimal {
    if total == 0 {
        Decimal::ONE
    } else {
        Decimal::from(compliant) / Decimal::from(total)
    }
}

fn to_percent(value: Decimal) -> u32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

fn chemical_deficiency(pillar: Pillar, chemical: &Chemical) -> Option<String> {
    match pillar {
        Pillar::SdsCurrency => match chemical.effective_sds_status() {
            SdsStatus::Current => None,
            SdsStatus::Missing => Some("Obtain the safety data sheet".to_string()),
            SdsStatus::Expired => Some("Replace the outdated safety data sheet".to_string()),
        },
        Pillar::Labels => (!chemical.labeled).then(|| "Print and apply a GHS label".to_string()),
        Pillar::Documentation => (!chemical.profile.is_fully_documented())
            .then(|| "Complete hazard, PPE and first-aid information".to_string()),
        Pillar::Training => None,
    }
}

fn training_action(status: &TrainingStatus) -> String {
    match status.status {
        DerivedTrainingStatus::Overdue => match status.due_date {
            Some(due) => format!("Refresher training overdue since {due}"),
            None => "Record the date of the last training session".to_string(),
        },
        DerivedTrainingStatus::InProgress => format!(
            "Finish training ({} of {} modules remaining)",
            status.remaining_count,
            status.completed_count + status.remaining_count
        ),
        DerivedTrainingStatus::NotStarted => "Start HazCom training".to_string(),
        DerivedTrainingStatus::Current | DerivedTrainingStatus::DueSoon => String::new(),
    }
}

fn improvement_text(pillar: Pillar, count: usize) -> String {
    let plural = |one: &str, many: &str| if count == 1 { one.to_string() } else { many.to_string() };
    match pillar {
        Pillar::SdsCurrency => format!(
            "Resolve {} missing or outdated {}",
            count,
            plural("SDS", "SDSs")
        ),
        Pillar::Labels => format!("Label {} {}", count, plural("chemical", "chemicals")),
        Pillar::Documentation => format!(
            "Complete documentation for {} {}",
            count,
            plural("chemical", "chemicals")
        ),
        Pillar::Training => format!("Train {} {}", count, plural("employee", "employees")),
    }
}
