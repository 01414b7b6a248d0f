/// One module of the HazCom training curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingModule {
    /// Canonical identifier stored on new records.
    pub id: &'static str,
    /// Identifiers used by older records for the same module.
    pub aliases: &'static [&'static str],
    pub title: &'static str,
}

pub const MODULE_COUNT: usize = 7;

/// The fixed curriculum, in teaching order.
pub const CURRICULUM: [TrainingModule; MODULE_COUNT] = [
    TrainingModule {
        id: "hazcom-overview",
        aliases: &["m1"],
        title: "Hazard Communication Overview",
    },
    TrainingModule {
        id: "ghs-labels",
        aliases: &["m2"],
        title: "Reading GHS Labels",
    },
    TrainingModule {
        id: "sds-sections",
        aliases: &["m3"],
        title: "Safety Data Sheets",
    },
    TrainingModule {
        id: "chemical-hazards",
        aliases: &["m4"],
        title: "Physical and Health Hazards",
    },
    TrainingModule {
        id: "ppe",
        aliases: &["m5"],
        title: "Personal Protective Equipment",
    },
    TrainingModule {
        id: "emergency-procedures",
        aliases: &["m6"],
        title: "Spills and Emergency Procedures",
    },
    TrainingModule {
        id: "workplace-chemicals",
        aliases: &["m7"],
        title: "Chemicals in This Workplace",
    },
];

/// Resolve a stored module identifier (canonical or legacy) to its module.
pub fn canonical_module(id: &str) -> Option<&'static TrainingModule> {
    let id = id.trim().to_lowercase();
    CURRICULUM
        .iter()
        .find(|m| m.id == id || m.aliases.contains(&id.as_str()))
}

/// Curriculum modules present in a completion list, in curriculum order.
/// Synonyms collapse to one module; unknown identifiers are ignored.
pub fn completed_modules(ids: &[String]) -> Vec<&'static TrainingModule> {
    let mut done = [false; MODULE_COUNT];
    for id in ids {
        match canonical_module(id) {
            Some(module) => {
                if let Some(pos) = CURRICULUM.iter().position(|m| m.id == module.id) {
                    done[pos] = true;
                }
            }
            None => log::debug!("ignoring unknown training module '{}'", id),
        }
    }
    CURRICULUM
        .iter()
        .zip(done)
        .filter_map(|(m, d)| d.then_some(m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_legacy_and_canonical_ids() {
        assert_eq!(canonical_module("m1").unwrap().id, "hazcom-overview");
        assert_eq!(canonical_module("hazcom-overview").unwrap().id, "hazcom-overview");
        assert_eq!(canonical_module(" M5 ").unwrap().id, "ppe");
        assert!(canonical_module("m8").is_none());
    }

    #[test]
    fn test_synonyms_collapse() {
        let done = completed_modules(&ids(&["m1", "hazcom-overview", "m2"]));
        assert_eq!(done.len(), 2);
    }

    #[test]
    fn test_curriculum_order_and_unknowns() {
        let done = completed_modules(&ids(&["ppe", "bogus", "m2"]));
        let got: Vec<&str> = done.iter().map(|m| m.id).collect();
        assert_eq!(got, vec!["ghs-labels", "ppe"]);
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in CURRICULUM.iter().enumerate() {
            for b in &CURRICULUM[i + 1..] {
                assert_ne!(a.id, b.id);
                assert!(!b.aliases.iter().any(|x| a.aliases.contains(x)));
            }
        }
    }
}
