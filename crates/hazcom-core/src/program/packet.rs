use super::{cell, or_dash};
use crate::label::{build_label, GhsLabel};
use crate::model::{Chemical, Employee, FirstAid, PpeRequirements};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// What a contractor needs to know about one chemical in their work area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketChemical {
    pub label: GhsLabel,
    pub location: String,
    pub ppe: PpeRequirements,
    pub first_aid: FirstAid,
    pub sds_on_file: bool,
    pub sds_url: Option<String>,
}

/// Distinct PPE items across every chemical in the packet, per body area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpeSummary {
    pub eyes: Vec<String>,
    pub hands: Vec<String>,
    pub respiratory: Vec<String>,
    pub body: Vec<String>,
}

impl PpeSummary {
    fn add(&mut self, ppe: &PpeRequirements) {
        push_distinct(&mut self.eyes, ppe.eyes.as_deref());
        push_distinct(&mut self.hands, ppe.hands.as_deref());
        push_distinct(&mut self.respiratory, ppe.respiratory.as_deref());
        push_distinct(&mut self.body, ppe.body.as_deref());
    }

    pub fn is_empty(&self) -> bool {
        self.eyes.is_empty()
            && self.hands.is_empty()
            && self.respiratory.is_empty()
            && self.body.is_empty()
    }
}

fn push_distinct(items: &mut Vec<String>, value: Option<&str>) {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return;
    };
    if !items.iter().any(|i| i.eq_ignore_ascii_case(value)) {
        items.push(value.to_string());
    }
}

/// Safety packet handed to an outside contractor before work starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorPacket {
    pub site: String,
    /// Work area the packet covers; `None` covers the whole site.
    pub area: Option<String>,
    pub generated_on: NaiveDate,
    /// Site contact for chemical questions.
    pub coordinator: Option<String>,
    pub chemicals: Vec<PacketChemical>,
    pub ppe: PpeSummary,
}

/// Build the contractor packet for `area` (matched case-insensitively
/// against chemical locations), or for the whole site.
pub fn build_contractor_packet(
    site: &str,
    area: Option<&str>,
    chemicals: &[Chemical],
    employees: &[Employee],
    now: DateTime<Utc>,
) -> ContractorPacket {
    let area = area.map(str::trim).filter(|a| !a.is_empty());
    let wanted = area.map(str::to_lowercase);

    let mut ppe = PpeSummary::default();
    let selected: Vec<PacketChemical> = chemicals
        .iter()
        .filter(|c| match wanted.as_deref() {
            Some(w) => c.location.trim().to_lowercase() == w,
            None => true,
        })
        .map(|c| {
            ppe.add(&c.profile.ppe_required);
            PacketChemical {
                label: build_label(c),
                location: c.location.clone(),
                ppe: c.profile.ppe_required.clone(),
                first_aid: c.profile.first_aid.clone(),
                sds_on_file: c.has_sds(),
                sds_url: c.sds_url.clone(),
            }
        })
        .collect();

    if let Some(area) = area {
        if selected.is_empty() {
            log::warn!("no chemicals are stored in area '{area}'");
        }
    }

    ContractorPacket {
        site: site.to_string(),
        area: area.map(str::to_string),
        generated_on: now.date_naive(),
        coordinator: employees
            .iter()
            .find(|e| e.is_program_coordinator())
            .map(|e| e.name.clone()),
        chemicals: selected,
        ppe,
    }
}

impl ContractorPacket {
    /// Render the packet as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let scope = self.area.as_deref().unwrap_or("all areas");

        let _ = writeln!(out, "# Contractor Safety Packet: {} ({})\n", self.site, scope);
        let _ = writeln!(out, "Issued {}.\n", self.generated_on);
        let _ = writeln!(
            out,
            "Site contact for chemical hazards: **{}**\n",
            self.coordinator.as_deref().unwrap_or("(not assigned)")
        );

        if self.chemicals.is_empty() {
            let _ = writeln!(out, "No hazardous chemicals are stored in this area.");
            return out;
        }

        let _ = writeln!(out, "## Required PPE\n");
        if self.ppe.is_empty() {
            let _ = writeln!(out, "No PPE is listed for these chemicals.\n");
        } else {
            ppe_line(&mut out, "Eyes", &self.ppe.eyes);
            ppe_line(&mut out, "Hands", &self.ppe.hands);
            ppe_line(&mut out, "Respiratory", &self.ppe.respiratory);
            ppe_line(&mut out, "Body", &self.ppe.body);
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "## Chemicals\n");
        for c in &self.chemicals {
            let label = &c.label;
            let _ = writeln!(out, "### {}\n", label.product_identifier);
            let _ = writeln!(out, "- Location: {}", or_dash(Some(c.location.as_str())));
            let _ = writeln!(out, "- Supplier: {}", or_dash(Some(label.supplier.as_str())));
            let _ = writeln!(
                out,
                "- Signal word: {}",
                label.signal_word.map_or("-".to_string(), |s| s.to_string())
            );
            if !label.pictograms.is_empty() {
                let names: Vec<String> = label
                    .pictograms
                    .iter()
                    .map(|p| format!("{} ({})", p.symbol(), p.code()))
                    .collect();
                let _ = writeln!(out, "- Pictograms: {}", names.join(", "));
            }
            for s in &label.hazard_statements {
                let _ = writeln!(out, "- Hazard: {s}");
            }
            let _ = writeln!(
                out,
                "- PPE: eyes {}, hands {}, respiratory {}, body {}",
                or_dash(c.ppe.eyes.as_deref()),
                or_dash(c.ppe.hands.as_deref()),
                or_dash(c.ppe.respiratory.as_deref()),
                or_dash(c.ppe.body.as_deref())
            );
            let _ = writeln!(out, "- First aid:");
            let _ = writeln!(out, "  - Eyes: {}", or_dash(c.first_aid.eyes.as_deref()));
            let _ = writeln!(out, "  - Skin: {}", or_dash(c.first_aid.skin.as_deref()));
            let _ = writeln!(
                out,
                "  - Inhalation: {}",
                or_dash(c.first_aid.inhalation.as_deref())
            );
            let _ = writeln!(
                out,
                "  - Ingestion: {}",
                or_dash(c.first_aid.ingestion.as_deref())
            );
            let sds = match (&c.sds_url, c.sds_on_file) {
                (Some(url), _) if !url.trim().is_empty() => cell(url),
                (_, true) => "on file at the site office".to_string(),
                _ => "not on file; ask the site contact".to_string(),
            };
            let _ = writeln!(out, "- Safety data sheet: {sds}\n");
        }

        out
    }
}

fn ppe_line(out: &mut String, area: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = writeln!(out, "- {area}: {}", items.join("; "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AddedMethod, HazardProfile, SignalWord, Statement};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn chemical(name: &str, location: &str, eyes: &str, hands: Option<&str>) -> Chemical {
        Chemical::new_from_profile(
            HazardProfile {
                product_name: name.into(),
                manufacturer: "Acme".into(),
                signal_word: Some(SignalWord::Danger),
                pictogram_codes: vec!["GHS02".into()],
                hazard_statements: vec![Statement {
                    code: "H225".into(),
                    text: "Highly flammable liquid and vapour".into(),
                }],
                ppe_required: PpeRequirements {
                    eyes: Some(eyes.into()),
                    hands: hands.map(str::to_string),
                    ..Default::default()
                },
                first_aid: FirstAid {
                    eyes: Some("Rinse for 15 minutes".into()),
                    ..Default::default()
                },
                ..Default::default()
            },
            AddedMethod::Manual,
            "tester",
            location,
            now(),
        )
    }

    #[test]
    fn test_packet_for_one_area() {
        let mut acetone = chemical("Acetone", "Paint Booth", "Goggles", Some("Nitrile gloves"));
        acetone.sds_url = Some("https://sds.example/acetone.pdf".into());
        let chemicals = vec![
            acetone,
            chemical("Lacquer Thinner", "paint booth ", "goggles", Some("Butyl gloves")),
            chemical("Bleach", "Janitor closet", "Safety glasses", None),
        ];
        let employees = vec![
            Employee::new("Sam", "Helper"),
            Employee::new("Dana", "Shop Manager"),
        ];

        let packet = build_contractor_packet(
            "Main Street Shop",
            Some("PAINT BOOTH"),
            &chemicals,
            &employees,
            now(),
        );

        let names: Vec<&str> = packet
            .chemicals
            .iter()
            .map(|c| c.label.product_identifier.as_str())
            .collect();
        assert_eq!(names, vec!["Acetone", "Lacquer Thinner"]);
        assert_eq!(packet.area.as_deref(), Some("PAINT BOOTH"));
        assert_eq!(packet.coordinator.as_deref(), Some("Dana"));
        assert_eq!(packet.ppe.eyes, vec!["Goggles"]);
        assert_eq!(packet.ppe.hands, vec!["Nitrile gloves", "Butyl gloves"]);
        assert!(packet.ppe.respiratory.is_empty());
        assert!(packet.chemicals[0].sds_on_file);
        assert!(!packet.chemicals[1].sds_on_file);

        let doc = packet.to_markdown();
        assert!(doc.starts_with("# Contractor Safety Packet: Main Street Shop (PAINT BOOTH)"));
        assert!(doc.contains("- Hands: Nitrile gloves; Butyl gloves"));
        assert!(doc.contains("### Lacquer Thinner"));
        assert!(doc.contains("- Pictograms: Flame (GHS02)"));
        assert!(doc.contains("- Hazard: H225"));
        assert!(doc.contains("- Safety data sheet: https://sds.example/acetone.pdf"));
        assert!(doc.contains("- Safety data sheet: not on file; ask the site contact"));
        assert!(!doc.contains("Bleach"));
    }

    #[test]
    fn test_whole_site_and_empty_area() {
        let chemicals = vec![
            chemical("Acetone", "Paint Booth", "Goggles", None),
            chemical("Bleach", "Janitor closet", "Safety glasses", None),
        ];

        let all = build_contractor_packet("Shop", Some("  "), &chemicals, &[], now());
        assert_eq!(all.area, None);
        assert_eq!(all.chemicals.len(), 2);
        assert_eq!(all.ppe.eyes, vec!["Goggles", "Safety glasses"]);
        assert!(all.coordinator.is_none());

        let none = build_contractor_packet("Shop", Some("Roof"), &chemicals, &[], now());
        assert!(none.chemicals.is_empty());
        assert!(none
            .to_markdown()
            .contains("No hazardous chemicals are stored in this area."));
    }
}
