use super::{cell, or_dash};
use crate::compliance::curriculum::CURRICULUM;
use crate::compliance::{
    calculate_compliance_score, training_roster, ComplianceScore, EmployeeTraining,
};
use crate::model::{Chemical, Employee, SdsStatus, SignalWord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One row of the program's chemical list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub product_name: String,
    pub manufacturer: String,
    pub location: String,
    pub container_count: u32,
    pub signal_word: Option<SignalWord>,
    pub sds_status: SdsStatus,
    pub labeled: bool,
}

/// The written hazard communication program for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenProgram {
    pub site: String,
    pub generated_on: NaiveDate,
    /// Person responsible for the program, if the roster names one.
    pub coordinator: Option<String>,
    pub inventory: Vec<InventoryLine>,
    /// Products with no current safety data sheet on file.
    pub sds_gaps: Vec<String>,
    /// Products whose containers still need a label.
    pub unlabeled: Vec<String>,
    /// Module titles, in teaching order.
    pub curriculum: Vec<String>,
    pub roster: Vec<EmployeeTraining>,
    pub compliance: ComplianceScore,
}

/// Assemble the written program from the current inventory and roster.
///
/// Training status comes from the derived status, never the stored one.
pub fn build_written_program(
    site: &str,
    chemicals: &[Chemical],
    employees: &[Employee],
    now: DateTime<Utc>,
) -> WrittenProgram {
    let compliance = calculate_compliance_score(chemicals, employees, now);

    let inventory = chemicals
        .iter()
        .map(|c| InventoryLine {
            product_name: c.name().to_string(),
            manufacturer: c.profile.manufacturer.clone(),
            location: c.location.clone(),
            container_count: c.container_count,
            signal_word: c.profile.signal_word,
            sds_status: c.effective_sds_status(),
            labeled: c.labeled,
        })
        .collect::<Vec<_>>();

    let sds_gaps = inventory
        .iter()
        .filter(|line| line.sds_status != SdsStatus::Current)
        .map(|line| line.product_name.clone())
        .collect();
    let unlabeled = inventory
        .iter()
        .filter(|line| !line.labeled)
        .map(|line| line.product_name.clone())
        .collect();

    log::debug!(
        "written program for '{}': {} chemicals, {} employees",
        site,
        chemicals.len(),
        employees.len()
    );

    WrittenProgram {
        site: site.to_string(),
        generated_on: now.date_naive(),
        coordinator: compliance.program_coordinator.clone(),
        inventory,
        sds_gaps,
        unlabeled,
        curriculum: CURRICULUM.iter().map(|m| m.title.to_string()).collect(),
        roster: training_roster(employees, now),
        compliance,
    }
}

impl WrittenProgram {
    /// Render the program as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let coordinator = self.coordinator.as_deref().unwrap_or("(not assigned)");
        let responsible = self
            .coordinator
            .as_deref()
            .unwrap_or("the program coordinator");

        let _ = writeln!(out, "# Hazard Communication Program: {}\n", self.site);
        let _ = writeln!(out, "Generated {}.\n", self.generated_on);

        let _ = writeln!(out, "## 1. Purpose and responsibility\n");
        let _ = writeln!(
            out,
            "This program describes how {} informs employees about the chemical \
             hazards in their workplace, as required by OSHA 29 CFR 1910.1200.\n",
            self.site
        );
        let _ = writeln!(out, "Program coordinator: **{coordinator}**\n");

        let _ = writeln!(out, "## 2. Chemical inventory\n");
        if self.inventory.is_empty() {
            let _ = writeln!(out, "No hazardous chemicals are on record.\n");
        } else {
            let _ = writeln!(
                out,
                "| Product | Manufacturer | Location | Containers | Signal word | SDS | Labeled |"
            );
            let _ = writeln!(out, "|---|---|---|---|---|---|---|");
            for line in &self.inventory {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} | {} |",
                    cell(&line.product_name),
                    or_dash(Some(line.manufacturer.as_str())),
                    or_dash(Some(line.location.as_str())),
                    line.container_count,
                    line.signal_word.map_or("-".to_string(), |s| s.to_string()),
                    line.sds_status,
                    if line.labeled { "yes" } else { "no" }
                );
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "## 3. Safety data sheets\n");
        let _ = writeln!(
            out,
            "A safety data sheet is kept for every product on the inventory and is \
             available to employees on every shift. New sheets are obtained by \
             {responsible} whenever a product is added or its sheet is revised.\n"
        );
        list_or_none(&mut out, "Sheets still to obtain", &self.sds_gaps);

        let _ = writeln!(out, "## 4. Labels and other forms of warning\n");
        let _ = writeln!(
            out,
            "Shipped containers keep the manufacturer's label. Secondary containers \
             carry a GHS label with the product identifier, signal word, pictograms, \
             hazard and precautionary statements and supplier.\n"
        );
        list_or_none(&mut out, "Containers still to label", &self.unlabeled);

        let _ = writeln!(out, "## 5. Employee training\n");
        let _ = writeln!(
            out,
            "Employees complete the following modules before working with hazardous \
             chemicals, and repeat them every 12 months:\n"
        );
        for (i, title) in self.curriculum.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, title);
        }
        let _ = writeln!(out);
        if self.roster.is_empty() {
            let _ = writeln!(out, "No employees are on record.\n");
        } else {
            let _ = writeln!(out, "| Employee | Role | Status | Refresher due |");
            let _ = writeln!(out, "|---|---|---|---|");
            for r in &self.roster {
                let due = r
                    .training
                    .due_date
                    .map_or_else(|| "-".to_string(), |d| d.to_string());
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    cell(&r.name),
                    or_dash(Some(r.role.as_str())),
                    r.training.status,
                    due
                );
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "## 6. Contractors\n");
        let _ = writeln!(
            out,
            "Before work begins, contractors receive a safety packet listing the \
             chemicals in their work area with label information, required PPE and \
             first aid. Contractors report any chemicals they bring on site to \
             {responsible}.\n"
        );

        let _ = writeln!(out, "## 7. Compliance status\n");
        let _ = writeln!(
            out,
            "Overall readiness: **{}%** ({})\n",
            self.compliance.overall, self.compliance.status
        );
        for p in &self.compliance.breakdown {
            let _ = writeln!(
                out,
                "- {}: {}% ({}/{})",
                p.pillar.title(),
                p.score,
                p.compliant,
                p.total
            );
        }
        if !self.compliance.action_items.is_empty() {
            let _ = writeln!(out, "\nOpen action items:\n");
            for item in &self.compliance.action_items {
                let _ = writeln!(out, "- {}: {}", cell(&item.subject), item.description);
            }
        }

        out
    }
}

fn list_or_none(out: &mut String, heading: &str, names: &[String]) {
    if names.is_empty() {
        let _ = writeln!(out, "{heading}: none.\n");
        return;
    }
    let _ = writeln!(out, "{heading}:\n");
    for name in names {
        let _ = writeln!(out, "- {name}");
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::DerivedTrainingStatus;
    use crate::model::{AddedMethod, HazardProfile};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn chemical(name: &str, labeled: bool, sds_url: Option<&str>) -> Chemical {
        let mut c = Chemical::new_from_profile(
            HazardProfile {
                product_name: name.into(),
                manufacturer: "Acme".into(),
                signal_word: Some(SignalWord::Danger),
                ..Default::default()
            },
            AddedMethod::Manual,
            "tester",
            "Paint booth",
            now(),
        );
        c.labeled = labeled;
        c.sds_url = sds_url.map(str::to_string);
        c.sds_status = if sds_url.is_some() {
            SdsStatus::Current
        } else {
            SdsStatus::Missing
        };
        c
    }

    #[test]
    fn test_program_lists_gaps_and_coordinator() {
        let chemicals = vec![
            chemical("Acetone", true, Some("https://sds.example/acetone.pdf")),
            chemical("Mineral Spirits", false, None),
        ];
        let mut owner = Employee::new("Dana", "Owner");
        owner.completed_modules = CURRICULUM.iter().map(|m| m.id.to_string()).collect();
        owner.last_training = Some(now().date_naive() - Duration::days(30));
        let employees = vec![Employee::new("Sam", "Helper"), owner];

        let program = build_written_program("Main Street Shop", &chemicals, &employees, now());

        assert_eq!(program.coordinator.as_deref(), Some("Dana"));
        assert_eq!(program.sds_gaps, vec!["Mineral Spirits"]);
        assert_eq!(program.unlabeled, vec!["Mineral Spirits"]);
        assert_eq!(program.curriculum.len(), 7);
        assert_eq!(program.roster[0].training.status, DerivedTrainingStatus::NotStarted);
        assert_eq!(program.roster[1].training.status, DerivedTrainingStatus::Current);
        assert_eq!(program.generated_on, now().date_naive());

        let doc = program.to_markdown();
        assert!(doc.starts_with("# Hazard Communication Program: Main Street Shop"));
        assert!(doc.contains("Program coordinator: **Dana**"));
        assert!(doc.contains("| Acetone | Acme | Paint booth | 1 | DANGER | current | yes |"));
        assert!(doc.contains("Sheets still to obtain:\n\n- Mineral Spirits"));
        assert!(doc.contains("7. Chemicals in This Workplace"));
        assert!(doc.contains("| Sam | Helper | not-started | - |"));
    }

    #[test]
    fn test_empty_site_program() {
        let program = build_written_program("New Site", &[], &[], now());
        assert!(program.coordinator.is_none());
        assert_eq!(program.compliance.overall, 100);

        let doc = program.to_markdown();
        assert!(doc.contains("Program coordinator: **(not assigned)**"));
        assert!(doc.contains("No hazardous chemicals are on record."));
        assert!(doc.contains("Sheets still to obtain: none."));
        assert!(doc.contains("No employees are on record."));
    }
}
