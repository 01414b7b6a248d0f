use hazcom_core::compliance::{ComplianceScore, EmployeeTraining};
use hazcom_core::label::GhsLabel;
use hazcom_core::model::{Employee, HazardProfile, Statement};
use hazcom_core::reconcile::{CanonicalRecord, FieldSource, MatchRule};

pub fn print_record(record: &CanonicalRecord) {
    match (&record.matched_entry, &record.match_rule) {
        (Some(entry), Some(rule)) => {
            let how = match rule {
                MatchRule::Containment => "name containment".to_string(),
                MatchRule::SharedWords { shared } => format!("{shared} shared words"),
            };
            println!("Matched catalog entry: {entry} ({how})\n");
        }
        _ => println!("No catalog match; showing the label as extracted\n"),
    }

    print_profile(&record.profile);

    if let Some(confidence) = record.confidence {
        println!("  Extraction confidence: {:.0}%", confidence * 100.0);
    }
    if !record.fields_uncertain.is_empty() {
        println!("  Uncertain fields: {}", record.fields_uncertain.join(", "));
    }
    if record.is_matched() {
        let from_label: Vec<&str> = record.trace.from_extraction().collect();
        if !from_label.is_empty() {
            println!("  Read off the label: {}", from_label.join(", "));
        }
        let from_catalog = record
            .trace
            .fields
            .iter()
            .filter(|f| f.source == FieldSource::Reference)
            .count();
        println!("  Filled in from catalog: {from_catalog} field(s)");
    }
    if !record.dropped_fields.is_empty() {
        println!("  Dropped (malformed): {}", record.dropped_fields.join(", "));
    }
}

pub fn print_profile(profile: &HazardProfile) {
    println!("=== {} ===\n", profile.product_name);
    field("Manufacturer", Some(profile.manufacturer.as_str()));
    field(
        "Signal word",
        profile.signal_word.map(|s| s.to_string()).as_deref(),
    );
    if !profile.pictogram_codes.is_empty() {
        field("Pictograms", Some(profile.pictogram_codes.join(", ").as_str()));
    }
    if !profile.cas_numbers.is_empty() {
        field("CAS", Some(profile.cas_numbers.join(", ").as_str()));
    }
    field("UN number", profile.un_number.as_deref());
    if let Some(ref nfpa) = profile.nfpa_diamond {
        field(
            "NFPA 704",
            Some(
                format!(
                    "health {} / flammability {} / instability {}",
                    nfpa.health, nfpa.flammability, nfpa.instability
                )
                .as_str(),
            ),
        );
    }
    statements("Hazards", profile.hazard_statements.iter());
    statements("Precautions", profile.precautionary_statements.iter());

    let ppe = &profile.ppe_required;
    field("PPE eyes", ppe.eyes.as_deref());
    field("PPE hands", ppe.hands.as_deref());
    field("PPE respiratory", ppe.respiratory.as_deref());
    field("PPE body", ppe.body.as_deref());

    let aid = &profile.first_aid;
    field("First aid eyes", aid.eyes.as_deref());
    field("First aid skin", aid.skin.as_deref());
    field("First aid inhalation", aid.inhalation.as_deref());
    field("First aid ingestion", aid.ingestion.as_deref());

    field("Flash point", profile.physical_properties.flash_point.as_deref());
    field("Storage", profile.storage_requirements.as_deref());
    if !profile.incompatible_materials.is_empty() {
        field(
            "Incompatible with",
            Some(profile.incompatible_materials.join(", ").as_str()),
        );
    }
    println!();
}

fn field(label: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        println!("  {:<22} {}", format!("{label}:"), v);
    }
}

fn statements<'a>(label: &str, items: impl Iterator<Item = &'a Statement>) {
    let items: Vec<&Statement> = items.collect();
    if items.is_empty() {
        return;
    }
    println!("  {label}:");
    for s in items {
        println!("    {s}");
    }
}

pub fn print_score(score: &ComplianceScore) {
    println!(
        "Compliance score: {}% ({})\n",
        score.overall, score.status
    );

    for p in &score.breakdown {
        println!(
            "  {:<24} {:>3}%  {}/{}  (weight {})",
            p.pillar.title(),
            p.score,
            p.compliant,
            p.total,
            p.weight
        );
    }
    println!();

    if !score.improvements.is_empty() {
        println!("Biggest improvements:");
        for imp in &score.improvements {
            println!("  +{:<3} {}", imp.points, imp.description);
        }
        println!();
    }

    if !score.action_items.is_empty() {
        println!("Action items ({}):", score.action_item_count);
        let width = score
            .action_items
            .iter()
            .map(|a| a.subject.len())
            .max()
            .unwrap_or(10);
        for item in &score.action_items {
            println!(
                "  {:<width$}  {}",
                item.subject,
                item.description,
                width = width
            );
        }
        println!();
    }

    match &score.program_coordinator {
        Some(name) => println!("Written program coordinator: {name}"),
        None => println!("Written program coordinator: not assigned"),
    }
}

pub fn print_roster(roster: &[EmployeeTraining]) {
    if roster.is_empty() {
        println!("No employees on record.");
        return;
    }

    let width = roster.iter().map(|r| r.name.len()).max().unwrap_or(10);
    for r in roster {
        let t = &r.training;
        let due = match (t.days_until_due, t.due_date) {
            (Some(days), Some(date)) if days >= 0 => format!("due {date} ({days} days left)"),
            (Some(_), Some(date)) => format!("was due {date}"),
            _ => format!(
                "{}/{} modules",
                t.completed_count,
                t.completed_count + t.remaining_count
            ),
        };
        println!(
            "  {:<width$}  {:<12} {}",
            r.name,
            t.status.to_string(),
            due,
            width = width
        );
    }
}

pub fn print_employees(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No employees on record.");
        return;
    }

    let width = employees.iter().map(|e| e.name.len()).max().unwrap_or(10);
    for e in employees {
        let marker = if e.is_program_coordinator() {
            "  (program coordinator)"
        } else {
            ""
        };
        println!("  {:<width$}  {}{}", e.name, e.role, marker, width = width);
    }
}

pub fn print_label(label: &GhsLabel) {
    println!("=== {} ===\n", label.product_identifier);
    if let Some(signal) = label.signal_word {
        println!("  {signal}\n");
    }
    for p in &label.pictograms {
        println!("  [{}] {} - {}", p.code(), p.symbol(), p.meaning());
    }
    if !label.pictograms.is_empty() {
        println!();
    }
    statements("Hazard statements", label.hazard_statements.iter());
    statements("Precautionary statements", label.precautionary_statements.iter());
    if let Some(ref un) = label.un_number {
        println!("  {un}");
    }
    if !label.supplier.is_empty() {
        println!("\n  Supplier: {}", label.supplier);
    }
    if !label.unrecognized_pictograms.is_empty() {
        println!(
            "\n  Not GHS pictograms (omitted): {}",
            label.unrecognized_pictograms.join(", ")
        );
    }
}
