//! Primary Disorder Classification
//!
//! State machine keyed on the pH band. Produces 0 (no disturbance), 1 (simple)
//! or 2 (mixed) findings; a third can only be appended later by the
//! compensation evaluator.
//!
//! Within a band the metabolic tag is always listed before the respiratory one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::analyzers::{
    HCO3_HIGH, HCO3_LOW, PCO2_HIGH, PCO2_LOW, PH_ACIDEMIA_BELOW, PH_ALKALEMIA_ABOVE,
};
use crate::sample::BloodGasSample;

/// Acid-base disturbance tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disorder {
    MetabolicAcidosis,
    MetabolicAlkalosis,
    RespiratoryAcidosis,
    RespiratoryAlkalosis,
}

impl Disorder {
    pub const ALL: [Disorder; 4] = [
        Disorder::MetabolicAcidosis,
        Disorder::MetabolicAlkalosis,
        Disorder::RespiratoryAcidosis,
        Disorder::RespiratoryAlkalosis,
    ];

    pub fn is_metabolic(&self) -> bool {
        matches!(self, Disorder::MetabolicAcidosis | Disorder::MetabolicAlkalosis)
    }

    pub fn is_respiratory(&self) -> bool {
        !self.is_metabolic()
    }

    pub fn is_acidosis(&self) -> bool {
        matches!(self, Disorder::MetabolicAcidosis | Disorder::RespiratoryAcidosis)
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Disorder::MetabolicAcidosis => "Metabolic acidosis",
            Disorder::MetabolicAlkalosis => "Metabolic alkalosis",
            Disorder::RespiratoryAcidosis => "Respiratory acidosis",
            Disorder::RespiratoryAlkalosis => "Respiratory alkalosis",
        }
    }
}

/// Ordered disorder tags (never more than 3)
pub type DisorderList = SmallVec<[Disorder; 3]>;

/// pH band driving the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhBand {
    /// pH < 7.35
    Acidemic,
    /// 7.35 <= pH <= 7.45
    Normal,
    /// pH > 7.45
    Alkalemic,
}

impl PhBand {
    pub fn from_ph(ph: f64) -> Self {
        if ph < PH_ACIDEMIA_BELOW {
            PhBand::Acidemic
        } else if ph > PH_ALKALEMIA_ABOVE {
            PhBand::Alkalemic
        } else {
            PhBand::Normal
        }
    }
}

/// Simple / mixed / triple label derived from the tag count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisorderPattern {
    None,
    Simple,
    Mixed,
    /// Reserved. Classification yields at most two tags and compensation
    /// only appends to a simple disorder, so the engine never produces this.
    Triple,
}

impl DisorderPattern {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => DisorderPattern::None,
            1 => DisorderPattern::Simple,
            2 => DisorderPattern::Mixed,
            _ => DisorderPattern::Triple,
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            DisorderPattern::None => "No acid-base disturbance identified",
            DisorderPattern::Simple => "Simple disorder",
            DisorderPattern::Mixed => "Mixed disorder",
            DisorderPattern::Triple => "Triple disorder",
        }
    }
}

/// Classify the primary disturbance(s) from pH, pCO2 and HCO3
pub fn classify_disorders(sample: &BloodGasSample) -> DisorderList {
    let (pco2, hco3) = (sample.pco2, sample.hco3);
    let mut disorders = DisorderList::new();

    match PhBand::from_ph(sample.ph) {
        PhBand::Acidemic => {
            if hco3 < HCO3_LOW {
                disorders.push(Disorder::MetabolicAcidosis);
            }
            if pco2 > PCO2_HIGH {
                disorders.push(Disorder::RespiratoryAcidosis);
            }
        }
        PhBand::Alkalemic => {
            if hco3 > HCO3_HIGH {
                disorders.push(Disorder::MetabolicAlkalosis);
            }
            if pco2 < PCO2_LOW {
                disorders.push(Disorder::RespiratoryAlkalosis);
            }
        }
        PhBand::Normal => {
            // Fully compensated mixed pictures
            if hco3 < HCO3_LOW && pco2 < PCO2_LOW {
                disorders.push(Disorder::MetabolicAcidosis);
                disorders.push(Disorder::RespiratoryAlkalosis);
            } else if hco3 > HCO3_HIGH && pco2 > PCO2_HIGH {
                disorders.push(Disorder::MetabolicAlkalosis);
                disorders.push(Disorder::RespiratoryAcidosis);
            }
        }
    }

    tracing::debug!("Primary classification: {:?}", disorders);
    disorders
}
