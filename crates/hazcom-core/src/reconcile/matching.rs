use crate::catalog::ReferenceCatalog;
use crate::model::HazardProfile;
use serde::{Deserialize, Serialize};

/// Minimum number of shared meaningful words for a fuzzy match.
pub const MIN_SHARED_WORDS: usize = 3;

/// Words this short or shorter are ignored when counting shared words.
const MAX_NOISE_WORD_LEN: usize = 2;

/// Which rule produced a catalog match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MatchRule {
    /// One normalized name contains the other.
    Containment,
    /// Enough words overlap between the two names.
    SharedWords { shared: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogMatch<'a> {
    /// Position of the entry in the catalog.
    pub index: usize,
    pub entry: &'a HazardProfile,
    pub rule: MatchRule,
}

/// Lowercase and trim a product name for comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Find the catalog entry for an extracted product name.
///
/// Entries are tried in catalog order and the first one that satisfies
/// either the containment rule or the shared-word rule wins. Blank names
/// never match, on either side.
pub fn match_reference_entry<'a>(
    name: &str,
    catalog: &'a ReferenceCatalog,
) -> Option<CatalogMatch<'a>> {
    let input = normalize_name(name);
    if input.is_empty() {
        return None;
    }

    for (index, entry) in catalog.entries.iter().enumerate() {
        let candidate = normalize_name(&entry.product_name);
        if candidate.is_empty() {
            continue;
        }

        if input.contains(&candidate) || candidate.contains(&input) {
            log::debug!(
                "'{}' matched catalog entry '{}' by containment",
                name,
                entry.product_name
            );
            return Some(CatalogMatch {
                index,
                entry,
                rule: MatchRule::Containment,
            });
        }

        let shared = shared_word_count(&input, &candidate);
        if shared >= MIN_SHARED_WORDS {
            log::debug!(
                "'{}' matched catalog entry '{}' on {} shared words",
                name,
                entry.product_name,
                shared
            );
            return Some(CatalogMatch {
                index,
                entry,
                rule: MatchRule::SharedWords { shared },
            });
        }
    }

    log::debug!("no catalog entry matched '{}'", name);
    None
}

/// Count words of `input` that overlap (substring either way) with some
/// word of `candidate`. Both strings must already be normalized.
pub fn shared_word_count(input: &str, candidate: &str) -> usize {
    let input_words = meaningful_words(input);
    let candidate_words = meaningful_words(candidate);

    input_words
        .iter()
        .filter(|w| {
            candidate_words
                .iter()
                .any(|c| w.contains(c) || c.contains(*w))
        })
        .count()
}

fn meaningful_words(s: &str) -> Vec<&str> {
    s.split_whitespace()
        .filter(|w| w.chars().count() > MAX_NOISE_WORD_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> ReferenceCatalog {
        ReferenceCatalog {
            name: "test".into(),
            version: "1".into(),
            description: None,
            entries: names
                .iter()
                .map(|n| HazardProfile {
                    product_name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_exact_name_matches_itself() {
        let cat = catalog(&["CRC Brakleen", "Acetone Technical Grade", "Zep Citrus Degreaser"]);
        for (i, entry) in cat.entries.iter().enumerate() {
            let m = match_reference_entry(&entry.product_name, &cat).unwrap();
            assert_eq!(m.index, i);
            assert_eq!(m.rule, MatchRule::Containment);
        }
    }

    #[test]
    fn test_containment_both_directions() {
        let cat = catalog(&["Acetone Technical Grade"]);
        assert!(match_reference_entry("Acetone", &cat).is_some());
        assert!(match_reference_entry("Acetone Technical Grade Extra Strength", &cat).is_some());
    }

    #[test]
    fn test_case_and_whitespace_ignored() {
        let cat = catalog(&["CRC Brakleen"]);
        let m = match_reference_entry("  crc BRAKLEEN brake parts cleaner ", &cat).unwrap();
        assert_eq!(m.rule, MatchRule::Containment);
    }

    #[test]
    fn test_two_shared_words_do_not_match() {
        let cat = catalog(&["Zep Heavy Duty Citrus Degreaser"]);
        assert!(match_reference_entry("duty heavy orange", &cat).is_none());
    }

    #[test]
    fn test_three_shared_words_match() {
        let cat = catalog(&["Zep Heavy Duty Citrus Degreaser"]);
        let m = match_reference_entry("citrus heavy duty", &cat).unwrap();
        assert_eq!(m.rule, MatchRule::SharedWords { shared: 3 });
    }

    #[test]
    fn test_short_words_are_ignored() {
        // Only "one" and "mix" are longer than two characters.
        assert_eq!(shared_word_count("an of in one mix", "in an of one mix blend"), 2);
        let cat = catalog(&["Mix Of One In An Blend"]);
        assert!(match_reference_entry("an of in one mix", &cat).is_none());
    }

    #[test]
    fn test_shared_words_use_substring_overlap() {
        // "degreasers" contains "degreaser", "cleaner" contained by "cleaners"
        assert_eq!(
            shared_word_count("citrus degreasers cleaner", "citrus degreaser cleaners"),
            3
        );
    }

    #[test]
    fn test_blank_name_never_matches() {
        let cat = catalog(&["Acetone", " "]);
        assert!(match_reference_entry("", &cat).is_none());
        assert!(match_reference_entry("   ", &cat).is_none());
    }

    #[test]
    fn test_degenerate_catalog_entry_skipped() {
        let cat = catalog(&["", "Acetone"]);
        let m = match_reference_entry("Acetone", &cat).unwrap();
        assert_eq!(m.index, 1);
    }

    #[test]
    fn test_first_match_wins() {
        let cat = catalog(&["Brakleen", "CRC Brakleen"]);
        let m = match_reference_entry("CRC Brakleen", &cat).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.entry.product_name, "Brakleen");
    }

    #[test]
    fn test_no_match() {
        let cat = catalog(&["Acetone Technical Grade"]);
        assert!(match_reference_entry("Clorox Bleach", &cat).is_none());
    }
}
