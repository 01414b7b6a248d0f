use crate::model::{Chemical, SignalWord, Statement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine GHS hazard pictograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhsPictogram {
    #[serde(rename = "GHS01")]
    ExplodingBomb,
    #[serde(rename = "GHS02")]
    Flame,
    #[serde(rename = "GHS03")]
    FlameOverCircle,
    #[serde(rename = "GHS04")]
    GasCylinder,
    #[serde(rename = "GHS05")]
    Corrosion,
    #[serde(rename = "GHS06")]
    SkullAndCrossbones,
    #[serde(rename = "GHS07")]
    ExclamationMark,
    #[serde(rename = "GHS08")]
    HealthHazard,
    #[serde(rename = "GHS09")]
    Environment,
}

impl GhsPictogram {
    pub const ALL: [GhsPictogram; 9] = [
        GhsPictogram::ExplodingBomb,
        GhsPictogram::Flame,
        GhsPictogram::FlameOverCircle,
        GhsPictogram::GasCylinder,
        GhsPictogram::Corrosion,
        GhsPictogram::SkullAndCrossbones,
        GhsPictogram::ExclamationMark,
        GhsPictogram::HealthHazard,
        GhsPictogram::Environment,
    ];

    /// Parse a code like `GHS02` (case-insensitive, surrounding whitespace ignored).
    pub fn from_code(code: &str) -> Option<GhsPictogram> {
        let code = code.trim().to_uppercase();
        GhsPictogram::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            GhsPictogram::ExplodingBomb => "GHS01",
            GhsPictogram::Flame => "GHS02",
            GhsPictogram::FlameOverCircle => "GHS03",
            GhsPictogram::GasCylinder => "GHS04",
            GhsPictogram::Corrosion => "GHS05",
            GhsPictogram::SkullAndCrossbones => "GHS06",
            GhsPictogram::ExclamationMark => "GHS07",
            GhsPictogram::HealthHazard => "GHS08",
            GhsPictogram::Environment => "GHS09",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            GhsPictogram::ExplodingBomb => "Exploding bomb",
            GhsPictogram::Flame => "Flame",
            GhsPictogram::FlameOverCircle => "Flame over circle",
            GhsPictogram::GasCylinder => "Gas cylinder",
            GhsPictogram::Corrosion => "Corrosion",
            GhsPictogram::SkullAndCrossbones => "Skull and crossbones",
            GhsPictogram::ExclamationMark => "Exclamation mark",
            GhsPictogram::HealthHazard => "Health hazard",
            GhsPictogram::Environment => "Environment",
        }
    }

    /// Hazards the pictogram communicates, for training material and labels.
    pub fn meaning(&self) -> &'static str {
        match self {
            GhsPictogram::ExplodingBomb => "Explosives, self-reactives, organic peroxides",
            GhsPictogram::Flame => "Flammables, pyrophorics, self-heating, emits flammable gas",
            GhsPictogram::FlameOverCircle => "Oxidizers",
            GhsPictogram::GasCylinder => "Gases under pressure",
            GhsPictogram::Corrosion => "Skin corrosion/burns, eye damage, corrosive to metals",
            GhsPictogram::SkullAndCrossbones => "Acute toxicity (fatal or toxic)",
            GhsPictogram::ExclamationMark => {
                "Irritant, skin sensitizer, acute toxicity (harmful), narcotic effects"
            }
            GhsPictogram::HealthHazard => {
                "Carcinogen, mutagenicity, reproductive toxicity, respiratory sensitizer, aspiration toxicity"
            }
            GhsPictogram::Environment => "Aquatic toxicity",
        }
    }
}

impl fmt::Display for GhsPictogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

/// Content of a GHS-compliant secondary container label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhsLabel {
    pub product_identifier: String,
    pub supplier: String,
    pub signal_word: Option<SignalWord>,
    pub pictograms: Vec<GhsPictogram>,
    pub hazard_statements: Vec<Statement>,
    pub precautionary_statements: Vec<Statement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub un_number: Option<String>,
    /// Codes on the record that are not GHS pictograms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_pictograms: Vec<String>,
}

/// Build the label for a chemical from its hazard profile.
pub fn build_label(chemical: &Chemical) -> GhsLabel {
    let profile = &chemical.profile;
    let mut pictograms = Vec::new();
    let mut unrecognized = Vec::new();
    for code in &profile.pictogram_codes {
        match GhsPictogram::from_code(code) {
            Some(p) if !pictograms.contains(&p) => pictograms.push(p),
            Some(_) => {}
            None => {
                log::warn!("'{}' has unknown pictogram code '{}'", chemical.name(), code);
                unrecognized.push(code.clone());
            }
        }
    }

    GhsLabel {
        product_identifier: profile.product_name.clone(),
        supplier: profile.manufacturer.clone(),
        signal_word: profile.signal_word,
        pictograms,
        hazard_statements: profile.hazard_statements.clone(),
        precautionary_statements: profile.precautionary_statements.iter().cloned().collect(),
        un_number: profile.un_number.clone(),
        unrecognized_pictograms: unrecognized,
    }
}

/// Record that a label was printed for the chemical's containers.
pub fn mark_label_printed(chemical: &mut Chemical, now: DateTime<Utc>) {
    chemical.labeled = true;
    chemical.label_printed_date = Some(now.date_naive());
    chemical.last_updated = now;
}
